use rocket::serde::{Deserialize, Serialize};

use crate::leaderboard::Leaderboard;
use crate::score::ScoreEntry;

/// Name of the collection holding one ranking record per puzzle.
pub const RANKINGS_COLLECTION: &str = "rankings";

pub type TopTimes = Leaderboard<ScoreEntry>;

/// Opaque puzzle identifier, a single document path segment.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
#[serde(crate = "rocket::serde", transparent)]
pub struct PuzzleId(String);

impl PuzzleId {
    /// Accepts any non-empty string that fits in one path segment.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() || raw.contains('/') {
            None
        } else {
            Some(Self(raw.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of the ranking record for this puzzle, e.g. `rankings/daily-42`.
    pub fn document_path(&self) -> String {
        format!("{}/{}", RANKINGS_COLLECTION, self.0)
    }
}

impl std::fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The per-puzzle document holding the leaderboard's score list.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct RankingRecord {
    #[serde(rename = "puzzleId")]
    pub puzzle_id: PuzzleId,
    /// `None` when the document has no score list field at all.
    #[serde(rename = "topTimes", default, skip_serializing_if = "Option::is_none")]
    pub top_times: Option<TopTimes>,
}

impl RankingRecord {
    pub fn new(puzzle_id: PuzzleId, top_times: Vec<ScoreEntry>) -> Self {
        Self {
            puzzle_id,
            top_times: Some(Leaderboard::new(top_times)),
        }
    }
}
