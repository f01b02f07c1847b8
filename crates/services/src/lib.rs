//! # Services Crate
//!
//! Bridges the catalogue repository to presentation layers: query operations
//! that fetch entities and flatten them into display-ready records, the
//! comment-posting path, and sidebar listing utilities.
//!
//! Every function takes the repository as a parameter and runs to
//! completion synchronously; no state lives in this crate.

pub mod error;
pub mod movies;
pub mod projections;
pub mod utilities;

// Re-export commonly used types for convenience
pub use error::{Result, ServiceError};
pub use projections::{
    ActorRecord, CommentRecord, DirectorRecord, GenreRecord, MovieRecord, MovieSummary,
};
