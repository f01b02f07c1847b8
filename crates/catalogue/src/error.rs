//! Error types for the catalogue crate.
//!
//! Three error families, one per layer:
//! - `ModelError`: entity construction and association failures
//! - `RepositoryError`: store-level lookup and invariant failures
//! - `LoadError`: everything that can go wrong while ingesting source files

use crate::model::{MovieId, Year};
use thiserror::Error;

/// Errors raised by entity constructors, validating setters and the
/// sanctioned association helpers.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModelError {
    /// Movie ids start at 1; zero is reserved as "no such movie".
    #[error("movie id must be positive")]
    InvalidMovieId,

    #[error("movie title must be a non-empty string")]
    EmptyTitle,

    /// The catalogue does not model anything released before 1900.
    #[error("release year {0} predates 1900")]
    YearTooEarly(Year),

    #[error("{entity} name must be a non-empty string")]
    EmptyName { entity: &'static str },

    #[error("runtime must be non-negative, got {0}")]
    NegativeRuntime(i64),

    /// A genre was applied twice to the same movie.
    #[error("genre {genre:?} already applied to movie {title:?}")]
    GenreAlreadyApplied { genre: String, title: String },

    /// An actor was added twice to the same movie.
    #[error("actor {actor:?} already joined movie {title:?}")]
    ActorAlreadyJoined { actor: String, title: String },
}

/// Errors raised by `MemoryRepository` mutations and required lookups.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RepositoryError {
    /// `add_movie` enforces id uniqueness; a second insert with the same id
    /// is a caller error.
    #[error("a movie with id {0} is already stored")]
    DuplicateMovieId(MovieId),

    #[error("no movie with id {0}")]
    MovieNotFound(MovieId),

    /// The comment is not present in its user's comment list.
    #[error("comment not correctly attached to a user")]
    CommentNotAttachedToUser,

    /// The comment is not present in its movie's comment list.
    #[error("comment not correctly attached to a movie")]
    CommentNotAttachedToMovie,
}

/// Errors that can occur while parsing source files and populating the
/// repository.
#[derive(Error, Debug)]
pub enum LoadError {
    /// I/O error occurred while reading a source file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Line in a source file couldn't be parsed
    #[error("parse error at line {line} in {file}: {reason}")]
    Parse {
        file: String,
        line: usize,
        reason: String,
    },

    /// Expected number of fields in a row doesn't match actual
    #[error("expected {expected} fields but found {found} at line {line} in {file}")]
    FieldCountMismatch {
        file: String,
        expected: usize,
        found: usize,
        line: usize,
    },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Convenience alias for loader results.
pub type Result<T> = std::result::Result<T, LoadError>;
