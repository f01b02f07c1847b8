//! # Catalogue Crate
//!
//! In-memory domain and repository layer for a browsable movie catalogue.
//!
//! ## Main Components
//!
//! - **model**: entities (Movie, Genre, Director, Actor, User, Comment) and
//!   the sanctioned association helpers
//! - **repository**: `MemoryRepository`, the sorted, id-indexed store with
//!   reverse indices for genre/director/actor/title/date queries
//! - **loader**: parses the delimited source files and populates a repository
//!   at startup
//! - **error**: typed errors for each layer
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalogue::{loader, MemoryRepository};
//! use std::path::Path;
//!
//! let mut repo = MemoryRepository::new();
//! loader::populate(Path::new("data"), &mut repo)?;
//!
//! let movie = repo.get_movie(1).unwrap();
//! let action_ids = repo.get_movie_ids_for_genre("action");
//! println!("{} is one of {} action movies", movie.title(), action_ids.len());
//! ```
//!
//! The store is volatile: it is rebuilt from the source data on every process
//! start, and assumes a single logical writer at a time.

pub mod error;
pub mod loader;
pub mod model;
pub mod repository;

// Re-export commonly used types for convenience
pub use error::{LoadError, ModelError, RepositoryError};
pub use model::{
    // Type aliases
    MovieId,
    Year,
    // Core types
    Actor,
    Comment,
    Director,
    Genre,
    Movie,
    User,
    // Association helpers
    make_actor_association,
    make_comment,
    make_director_association,
    make_genre_association,
};
pub use repository::MemoryRepository;
