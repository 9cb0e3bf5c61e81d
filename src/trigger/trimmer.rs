use crate::database::{RankingStore, StoreResult};

use super::WriteEvent;

/// Number of entries a ranking record keeps unless configured otherwise.
pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrimOutcome {
    /// The record does not exist (anymore).
    Missing,
    /// The stored list is already sorted and within capacity, nothing written.
    Unchanged,
    /// The list was sorted and capped, then written back.
    Trimmed { before: usize, after: usize },
}

/// Keeps every ranking record's score list sorted ascending by time
/// and capped at the best `capacity` entries.
#[derive(Clone, Copy, Debug)]
pub struct LeaderboardTrimmer {
    capacity: usize,
}

impl Default for LeaderboardTrimmer {
    fn default() -> Self {
        Self::new(DEFAULT_LEADERBOARD_SIZE)
    }
}

impl LeaderboardTrimmer {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Handles a write to the ranking record named by `event`.
    ///
    /// The record is re-read from `store` rather than taken from the
    /// event, so the trim always applies to the latest persisted list.
    /// Storage failures are returned to the caller untouched.
    pub async fn on_write<S>(&self, store: &S, event: &WriteEvent) -> StoreResult<TrimOutcome>
    where
        S: RankingStore + ?Sized,
    {
        let record = match store.get(&event.puzzle_id).await? {
            Some(record) => record,
            None => return Ok(TrimOutcome::Missing),
        };

        let absent = record.top_times.is_none();
        let before = record.top_times.unwrap_or_default();
        let mut after = before.clone();
        after.trim(self.capacity);

        // Our own write fires the trigger again, stop once nothing changes
        if !absent && after == before {
            return Ok(TrimOutcome::Unchanged);
        }

        store.update_top_times(&event.puzzle_id, &after).await?;
        Ok(TrimOutcome::Trimmed {
            before: before.len(),
            after: after.len(),
        })
    }
}
