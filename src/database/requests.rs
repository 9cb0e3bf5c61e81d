use crate::score::ScoreEntry;
use crate::trigger::{Triggers, WriteKind};

use super::*;

fn parse_puzzle_id(puzzle_id: &str) -> RequestResult<PuzzleId> {
    PuzzleId::parse(puzzle_id).ok_or_else(|| RequestError::InvalidPuzzleId {
        puzzle_id: puzzle_id.to_owned(),
    })
}

/// Fetches the ranking record of the puzzle `puzzle_id`.
/// Responds with 404 if no such record exists.
#[get("/rankings/<puzzle_id>")]
pub async fn get_ranking(
    puzzle_id: &str,
    database: &State<SqlRankingStore>,
) -> RequestResult<Option<Json<RankingRecord>>> {
    let puzzle_id = parse_puzzle_id(puzzle_id)?;
    let record = database.get(&puzzle_id).await?;
    Ok(record.map(Json))
}

/// Appends a score entry to the ranking record of `puzzle_id`,
/// creating the record when this is the puzzle's first score.
/// The list is trimmed afterwards by the leaderboard trigger.
#[post("/rankings/<puzzle_id>/times", format = "json", data = "<score_entry>")]
pub async fn submit_time(
    puzzle_id: &str,
    score_entry: Json<ScoreEntry>,
    database: &State<SqlRankingStore>,
    triggers: &State<Triggers>,
) -> RequestResult<()> {
    let puzzle_id = parse_puzzle_id(puzzle_id)?;
    let score_entry = score_entry.0;

    // Read-modify-write, concurrent submissions may overwrite each other
    let kind = match database.get(&puzzle_id).await? {
        Some(record) => {
            let mut top_times = record.top_times.unwrap_or_default();
            top_times.add(score_entry);
            database.update_top_times(&puzzle_id, &top_times).await?;
            WriteKind::Update
        }
        None => {
            let record = RankingRecord::new(puzzle_id.clone(), vec![score_entry]);
            database.insert(&record).await?;
            WriteKind::Create
        }
    };

    triggers.publish(kind, puzzle_id.document_path());
    Ok(())
}

/// Replaces the score list of `puzzle_id`, creating the record if needed.
#[put("/rankings/<puzzle_id>", format = "json", data = "<top_times>")]
pub async fn put_ranking(
    puzzle_id: &str,
    top_times: Json<Vec<ScoreEntry>>,
    database: &State<SqlRankingStore>,
    triggers: &State<Triggers>,
) -> RequestResult<()> {
    let puzzle_id = parse_puzzle_id(puzzle_id)?;
    let top_times = TopTimes::new(top_times.0);

    let kind = match database.get(&puzzle_id).await? {
        Some(_) => {
            database.update_top_times(&puzzle_id, &top_times).await?;
            WriteKind::Update
        }
        None => {
            let record = RankingRecord {
                puzzle_id: puzzle_id.clone(),
                top_times: Some(top_times),
            };
            database.insert(&record).await?;
            WriteKind::Create
        }
    };

    triggers.publish(kind, puzzle_id.document_path());
    Ok(())
}

/// Deletes the ranking record of `puzzle_id`.
/// Returns whether such a record existed.
#[delete("/rankings/<puzzle_id>")]
pub async fn delete_ranking(
    puzzle_id: &str,
    database: &State<SqlRankingStore>,
    triggers: &State<Triggers>,
) -> RequestResult<Json<bool>> {
    let puzzle_id = parse_puzzle_id(puzzle_id)?;

    let deleted = database.delete(&puzzle_id).await?;
    if deleted {
        triggers.publish(WriteKind::Delete, puzzle_id.document_path());
    }

    Ok(Json(deleted))
}
