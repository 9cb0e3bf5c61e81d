use sqlx::any::AnyPoolOptions;

use super::*;

/// Ranking records persisted in the `rankings` table, the score list
/// stored as a JSON array (NULL when the record has no score list).
#[derive(Clone)]
pub struct SqlRankingStore {
    pool: DatabasePool,
}

impl SqlRankingStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = AnyPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Self::from_pool(pool).await
    }

    /// Wraps an existing pool, creating the `rankings` table if needed.
    pub async fn from_pool(pool: DatabasePool) -> StoreResult<Self> {
        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {} (puzzle_id VARCHAR(255) PRIMARY KEY, top_times TEXT NULL)",
            RANKINGS_COLLECTION,
        ))
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

fn encode(puzzle_id: &PuzzleId, top_times: &TopTimes) -> StoreResult<String> {
    serde_json::to_string(top_times).map_err(|source| StoreError::Corrupt {
        puzzle_id: puzzle_id.clone(),
        source,
    })
}

fn decode(puzzle_id: &PuzzleId, top_times: Option<String>) -> StoreResult<Option<TopTimes>> {
    top_times
        .map(|json| serde_json::from_str(&json))
        .transpose()
        .map_err(|source| StoreError::Corrupt {
            puzzle_id: puzzle_id.clone(),
            source,
        })
}

#[rocket::async_trait]
impl RankingStore for SqlRankingStore {
    async fn get(&self, puzzle_id: &PuzzleId) -> StoreResult<Option<RankingRecord>> {
        let response = sqlx::query(&format!(
            "SELECT top_times FROM {} WHERE puzzle_id = $1",
            RANKINGS_COLLECTION,
        ))
        .bind(puzzle_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match response {
            Some(row) => {
                let top_times = row.try_get::<Option<String>, usize>(0)?;
                Ok(Some(RankingRecord {
                    puzzle_id: puzzle_id.clone(),
                    top_times: decode(puzzle_id, top_times)?,
                }))
            }
            None => Ok(None),
        }
    }

    async fn update_top_times(&self, puzzle_id: &PuzzleId, top_times: &TopTimes) -> StoreResult<()> {
        let response = sqlx::query(&format!(
            "UPDATE {} SET top_times = $1 WHERE puzzle_id = $2",
            RANKINGS_COLLECTION,
        ))
        .bind(encode(puzzle_id, top_times)?)
        .bind(puzzle_id.as_str())
        .execute(&self.pool)
        .await?;

        if response.rows_affected() == 0 {
            return Err(StoreError::Missing {
                puzzle_id: puzzle_id.clone(),
            });
        }
        Ok(())
    }

    async fn insert(&self, record: &RankingRecord) -> StoreResult<()> {
        // Leave the column NULL for a record without a score list
        match &record.top_times {
            Some(top_times) => {
                sqlx::query(&format!(
                    "INSERT INTO {} (puzzle_id, top_times) VALUES ($1, $2)",
                    RANKINGS_COLLECTION,
                ))
                .bind(record.puzzle_id.as_str())
                .bind(encode(&record.puzzle_id, top_times)?)
                .execute(&self.pool)
                .await?;
            }
            None => {
                sqlx::query(&format!(
                    "INSERT INTO {} (puzzle_id) VALUES ($1)",
                    RANKINGS_COLLECTION,
                ))
                .bind(record.puzzle_id.as_str())
                .execute(&self.pool)
                .await?;
            }
        }

        Ok(())
    }

    async fn delete(&self, puzzle_id: &PuzzleId) -> StoreResult<bool> {
        let response = sqlx::query(&format!(
            "DELETE FROM {} WHERE puzzle_id = $1",
            RANKINGS_COLLECTION,
        ))
        .bind(puzzle_id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(response.rows_affected() > 0)
    }
}
