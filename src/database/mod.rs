use rocket::serde::json::{serde_json, Json};
use rocket::*;
use sqlx::Row;

#[cfg(test)]
mod memory;
mod record;
pub mod requests;
mod store;
mod store_error;

#[cfg(test)]
pub use memory::MemoryRankingStore;
pub use record::{PuzzleId, RankingRecord, TopTimes, RANKINGS_COLLECTION};
pub use store::SqlRankingStore;
pub use store_error::*;

pub type DatabasePool = sqlx::any::AnyPool;

/// Document store access to the ranking collection.
///
/// The trimmer only relies on [`RankingStore::get`] (a missing record is
/// `Ok(None)`) and [`RankingStore::update_top_times`]; inserts and deletes
/// come from the score submission routes.
#[rocket::async_trait]
pub trait RankingStore: Send + Sync {
    async fn get(&self, puzzle_id: &PuzzleId) -> StoreResult<Option<RankingRecord>>;

    /// Replaces only the score list of an existing record.
    /// Fails with [`StoreError::Missing`] if the record is gone.
    async fn update_top_times(&self, puzzle_id: &PuzzleId, top_times: &TopTimes)
        -> StoreResult<()>;

    async fn insert(&self, record: &RankingRecord) -> StoreResult<()>;

    /// Returns whether a record was removed.
    async fn delete(&self, puzzle_id: &PuzzleId) -> StoreResult<bool>;
}
