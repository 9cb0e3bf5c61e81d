use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::*;

/// In-process ranking store with write counting and injectable read
/// failures, standing in for the document store in tests.
#[derive(Default)]
pub struct MemoryRankingStore {
    records: Mutex<HashMap<PuzzleId, Option<TopTimes>>>,
    writes: AtomicUsize,
    failing_reads: AtomicUsize,
}

impl MemoryRankingStore {
    pub fn with_records(records: Vec<RankingRecord>) -> Self {
        let store = Self::default();
        {
            let mut map = store.records.lock().unwrap();
            for record in records {
                map.insert(record.puzzle_id, record.top_times);
            }
        }
        store
    }

    /// Number of successful `update_top_times` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Makes the next `count` reads fail with a database error.
    pub fn fail_reads(&self, count: usize) {
        self.failing_reads.store(count, Ordering::SeqCst);
    }

    pub fn top_times(&self, puzzle_id: &PuzzleId) -> Option<TopTimes> {
        self.records.lock().unwrap().get(puzzle_id).cloned().flatten()
    }
}

#[rocket::async_trait]
impl RankingStore for MemoryRankingStore {
    async fn get(&self, puzzle_id: &PuzzleId) -> StoreResult<Option<RankingRecord>> {
        let failing = self
            .failing_reads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if failing.is_ok() {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }

        let records = self.records.lock().unwrap();
        Ok(records.get(puzzle_id).map(|top_times| RankingRecord {
            puzzle_id: puzzle_id.clone(),
            top_times: top_times.clone(),
        }))
    }

    async fn update_top_times(
        &self,
        puzzle_id: &PuzzleId,
        top_times: &TopTimes,
    ) -> StoreResult<()> {
        let mut records = self.records.lock().unwrap();
        match records.get_mut(puzzle_id) {
            Some(stored) => {
                *stored = Some(top_times.clone());
                self.writes.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            None => Err(StoreError::Missing {
                puzzle_id: puzzle_id.clone(),
            }),
        }
    }

    async fn insert(&self, record: &RankingRecord) -> StoreResult<()> {
        let mut records = self.records.lock().unwrap();
        records.insert(record.puzzle_id.clone(), record.top_times.clone());
        Ok(())
    }

    async fn delete(&self, puzzle_id: &PuzzleId) -> StoreResult<bool> {
        Ok(self.records.lock().unwrap().remove(puzzle_id).is_some())
    }
}
