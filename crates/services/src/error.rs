//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the trivia question source.
///
/// Every variant means the source is unavailable for this attempt; none is retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("trivia source returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("trivia source rejected the request: {reason} (code {code})")]
    ResponseCode { code: u8, reason: &'static str },
    #[error("trivia source returned {got} questions, expected {expected}")]
    BatchSize { expected: usize, got: usize },
    #[error("trivia source returned malformed data: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by quiz services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),
    #[error("no completed quiz data")]
    NoData,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
