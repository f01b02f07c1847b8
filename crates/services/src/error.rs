//! Error types for the service layer.

use catalogue::{MovieId, RepositoryError};
use thiserror::Error;

/// Errors surfaced by the query/projection operations.
///
/// Movie and user resolution failures are distinct variants so callers can
/// report them separately.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("no movie with id {0}")]
    NonExistentMovie(MovieId),

    #[error("unknown user {0:?}")]
    UnknownUser(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Convenience alias for service results.
pub type Result<T> = std::result::Result<T, ServiceError>;
