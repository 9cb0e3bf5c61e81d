use rocket::{
    http::Status,
    response::{self, Responder},
    Request,
};
use thiserror::Error;

use super::PuzzleId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("no ranking record for puzzle {puzzle_id}")]
    Missing { puzzle_id: PuzzleId },
    #[error("ranking record for puzzle {puzzle_id} holds a malformed score list: {source}")]
    Corrupt {
        puzzle_id: PuzzleId,
        source: rocket::serde::json::serde_json::Error,
    },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid puzzle id: {puzzle_id:?}")]
    InvalidPuzzleId { puzzle_id: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl<'r> Responder<'r, 'static> for RequestError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = match self {
            Self::InvalidPuzzleId { .. } => Status::BadRequest,
            Self::Store(_) => {
                log::error!("{} {} failed: {}", request.method(), request.uri(), self);
                Status::InternalServerError
            }
        };

        (status, self.to_string()).respond_to(request)
    }
}

pub type RequestResult<T, E = RequestError> = std::result::Result<T, E>;
