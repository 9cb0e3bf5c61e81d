use std::cmp::Ordering;

use rocket::serde::json::{serde_json::Map, Value};
use rocket::serde::{Deserialize, Serialize};

use crate::leaderboard::LeaderboardItem;

/// Elapsed completion time of a puzzle run.
pub type ElapsedTime = f64;

/// One player's recorded completion time for a puzzle.
///
/// Only `time` is interpreted. Every other field of the stored object
/// (player reference, date, device...) is kept in `extra` and written
/// back exactly as it was read.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct ScoreEntry {
    pub time: ElapsedTime,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScoreEntry {
    #![allow(dead_code)]
    pub fn new(time: ElapsedTime) -> Self {
        Self {
            time,
            extra: Map::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_owned(), value.into());
        self
    }
}

impl LeaderboardItem for ScoreEntry {
    /// Lower times rank first. Times that cannot be compared are
    /// treated as equal so a stable sort keeps their input order.
    fn rank_cmp(&self, other: &Self) -> Ordering {
        self.time.partial_cmp(&other.time).unwrap_or(Ordering::Equal)
    }
}
