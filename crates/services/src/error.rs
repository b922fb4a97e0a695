//! Shared error types for the services crate.

use thiserror::Error;

use prep_core::model::{QuestionId, SkillId};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by a `FeedbackGateway`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FeedbackError {
    #[error("feedback service is not configured")]
    NotConfigured,
    #[error("feedback service returned {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed feedback response: {0}")]
    MalformedResponse(String),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Errors emitted by `PracticeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PracticeError {
    #[error("question {0} not found")]
    QuestionNotFound(QuestionId),
    #[error("skill {0} not found")]
    SkillNotFound(SkillId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `BoardService` and `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BoardError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
