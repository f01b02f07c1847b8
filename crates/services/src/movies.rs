//! Query/projection operations over the repository.
//!
//! Thin, stateless functions: each takes the repository as a parameter,
//! performs the lookup or mutation, and flattens the result into display
//! records. Single-entity operations fail with typed errors when the entity
//! is missing; list operations return empty collections instead.
//!
//! Pagination is the caller's business: slice an ordered id list
//! `[cursor..cursor + page_size]` and hand the slice to
//! [`get_movies_by_id`]; each requested id costs one O(1) lookup either way.

use crate::error::{Result, ServiceError};
use crate::projections::{
    comments_to_records, movie_to_record, movies_to_records, CommentRecord, MovieRecord,
};
use catalogue::{make_comment, MemoryRepository, MovieId, Year};
use chrono::Utc;

/// Fetch a single movie as a display record.
pub fn get_movie(movie_id: MovieId, repo: &MemoryRepository) -> Result<MovieRecord> {
    let movie = repo
        .get_movie(movie_id)
        .ok_or(ServiceError::NonExistentMovie(movie_id))?;
    Ok(movie_to_record(movie, repo))
}

/// Fetch movies by id, in the caller's order; missing ids are omitted.
pub fn get_movies_by_id(ids: &[MovieId], repo: &MemoryRepository) -> Vec<MovieRecord> {
    movies_to_records(&repo.get_movies_by_id(ids), repo)
}

/// The movie with id 1, projected; `None` on an empty repository.
pub fn get_first_movie(repo: &MemoryRepository) -> Option<MovieRecord> {
    repo.get_first_movie().map(|movie| movie_to_record(movie, repo))
}

/// The movie whose id equals the movie count, projected.
pub fn get_last_movie(repo: &MemoryRepository) -> Option<MovieRecord> {
    repo.get_last_movie().map(|movie| movie_to_record(movie, repo))
}

/// Movies for the target date (empty if none match), plus the year of the
/// previous and next movie in sort order (either may be absent).
pub fn get_movies_by_date(
    date: &str,
    repo: &MemoryRepository,
) -> (Vec<MovieRecord>, Option<Year>, Option<Year>) {
    let ids = repo.get_movie_ids_for_date(date);
    let movies = repo.get_movies_by_id(&ids);

    let mut previous_date = None;
    let mut next_date = None;
    if let Some(&first) = movies.first() {
        previous_date = repo.get_date_of_previous_movie(first);
        next_date = repo.get_date_of_next_movie(first);
    }

    (movies_to_records(&movies, repo), previous_date, next_date)
}

// Passthrough id queries; no transformation.

pub fn get_movie_ids_for_genre(genre_name: &str, repo: &MemoryRepository) -> Vec<MovieId> {
    repo.get_movie_ids_for_genre(genre_name)
}

pub fn get_movie_ids_for_director(director_name: &str, repo: &MemoryRepository) -> Vec<MovieId> {
    repo.get_movie_ids_for_director(director_name)
}

pub fn get_movie_ids_for_actor(actor_name: &str, repo: &MemoryRepository) -> Vec<MovieId> {
    repo.get_movie_ids_for_actor(actor_name)
}

pub fn get_movie_ids_for_title(title: &str, repo: &MemoryRepository) -> Vec<MovieId> {
    repo.get_movie_ids_for_title(title)
}

pub fn get_movie_ids_for_date(date: &str, repo: &MemoryRepository) -> Vec<MovieId> {
    repo.get_movie_ids_for_date(date)
}

/// Post a comment on a movie.
///
/// Resolves the movie first, then the user, failing with the corresponding
/// distinct error; on success the comment is wired through `make_comment`
/// and ingested by the repository.
pub fn add_comment(
    movie_id: MovieId,
    comment_text: &str,
    username: &str,
    repo: &mut MemoryRepository,
) -> Result<()> {
    let (user, movie) = repo.get_user_and_movie_mut(username, movie_id);
    let movie = movie.ok_or(ServiceError::NonExistentMovie(movie_id))?;
    let user = user.ok_or_else(|| ServiceError::UnknownUser(username.to_string()))?;

    let comment = make_comment(comment_text, user, movie, Utc::now());
    tracing::debug!(movie_id, username, "adding comment");
    repo.add_comment(comment)?;
    Ok(())
}

/// Set a movie's image hyperlink.
pub fn add_image_link(movie_id: MovieId, link: &str, repo: &mut MemoryRepository) -> Result<()> {
    if repo.get_movie(movie_id).is_none() {
        return Err(ServiceError::NonExistentMovie(movie_id));
    }
    repo.add_image_link(link, movie_id)?;
    Ok(())
}

/// Comments on a movie, flattened, in posting order.
pub fn get_comments_for_movie(
    movie_id: MovieId,
    repo: &MemoryRepository,
) -> Result<Vec<CommentRecord>> {
    let movie = repo
        .get_movie(movie_id)
        .ok_or(ServiceError::NonExistentMovie(movie_id))?;
    Ok(comments_to_records(movie.comments()))
}
