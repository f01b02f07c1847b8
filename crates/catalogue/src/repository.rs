//! The in-memory repository.
//!
//! `MemoryRepository` is the central mutable store: a movie sequence kept
//! sorted by the `(title, year)` ordering at all times, an id index for O(1)
//! lookup, and owned collections of genres, directors, actors, users and
//! comments that double as the reverse indices for the name-based queries.
//!
//! Single-writer: every operation is a plain synchronous method on
//! `&self`/`&mut self`, and callers that need concurrent access must funnel
//! writes through one exclusive path.

use crate::error::RepositoryError;
use crate::model::{Actor, Comment, Director, Genre, Movie, MovieId, User, Year};
use std::collections::HashMap;

/// In-memory store for the whole entity graph.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    /// Movies, sorted by the `(title, year)` key rather than by id.
    movies: Vec<Movie>,
    /// Position of each movie id within `movies`.
    movies_index: HashMap<MovieId, usize>,
    genres: Vec<Genre>,
    directors: Vec<Director>,
    actors: Vec<Actor>,
    users: Vec<User>,
    comments: Vec<Comment>,
    dates: Vec<Year>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub fn add_user(&mut self, user: User) {
        self.users.push(user);
    }

    /// Linear scan by username; `None` if absent.
    pub fn get_user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|user| user.username() == username)
    }

    pub fn get_users(&self) -> &[User] {
        &self.users
    }

    // ------------------------------------------------------------------
    // Movies
    // ------------------------------------------------------------------

    /// Insert a movie at the position that preserves the `(title, year)`
    /// ordering, and record its id in the index.
    ///
    /// Duplicate ids are rejected: the id index could only keep one of the
    /// two entries, so a second insert with the same id is a caller error.
    pub fn add_movie(&mut self, movie: Movie) -> Result<(), RepositoryError> {
        if self.movies_index.contains_key(&movie.id()) {
            return Err(RepositoryError::DuplicateMovieId(movie.id()));
        }

        // Leftmost insertion point among equal keys, so insertion is stable.
        let position = self
            .movies
            .partition_point(|stored| stored.sort_key() < movie.sort_key());
        self.movies.insert(position, movie);

        // Every movie at or after the insertion point has shifted right.
        for (index, stored) in self.movies.iter().enumerate().skip(position) {
            self.movies_index.insert(stored.id(), index);
        }
        Ok(())
    }

    /// O(1) lookup via the id index; `None` if absent.
    pub fn get_movie(&self, movie_id: MovieId) -> Option<&Movie> {
        self.movies_index
            .get(&movie_id)
            .map(|&index| &self.movies[index])
    }

    /// Mutable variant of [`get_movie`](Self::get_movie), used by the loader
    /// when wiring associations against stored movies.
    pub fn get_movie_mut(&mut self, movie_id: MovieId) -> Option<&mut Movie> {
        self.movies_index
            .get(&movie_id)
            .copied()
            .map(|index| &mut self.movies[index])
    }

    /// All movies in `(title, year)` order.
    pub fn get_movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn number_of_movies(&self) -> usize {
        self.movies.len()
    }

    /// The movie whose id equals 1. An identity-based lookup, not "first in
    /// sort order".
    pub fn get_first_movie(&self) -> Option<&Movie> {
        self.movies.iter().find(|movie| movie.id() == 1)
    }

    /// The movie whose id equals the total movie count; see
    /// [`get_first_movie`](Self::get_first_movie).
    pub fn get_last_movie(&self) -> Option<&Movie> {
        let last_id = self.movies.len() as MovieId;
        self.movies.iter().find(|movie| movie.id() == last_id)
    }

    /// Fetch movies by id, preserving the caller's requested order and
    /// silently dropping any id with no match.
    pub fn get_movies_by_id(&self, ids: &[MovieId]) -> Vec<&Movie> {
        ids.iter()
            .filter_map(|&movie_id| self.get_movie(movie_id))
            .collect()
    }

    // ------------------------------------------------------------------
    // Reverse-index queries
    // ------------------------------------------------------------------

    /// Ids of movies tagged with the named genre, in association order.
    /// Empty when no genre matches.
    pub fn get_movie_ids_for_genre(&self, genre_name: &str) -> Vec<MovieId> {
        self.genres
            .iter()
            .find(|genre| genre.name() == genre_name)
            .map(|genre| genre.tagged_movies().to_vec())
            .unwrap_or_default()
    }

    /// Ids of movies by the named director. The name matches the stored full
    /// name exactly or as one whitespace-separated token within it.
    pub fn get_movie_ids_for_director(&self, director_name: &str) -> Vec<MovieId> {
        self.directors
            .iter()
            .find(|director| name_matches(director.full_name(), director_name))
            .map(|director| director.directed_movies().to_vec())
            .unwrap_or_default()
    }

    /// Ids of movies the named actor joined; same matching rule as
    /// [`get_movie_ids_for_director`](Self::get_movie_ids_for_director).
    pub fn get_movie_ids_for_actor(&self, actor_name: &str) -> Vec<MovieId> {
        self.actors
            .iter()
            .find(|actor| name_matches(actor.full_name(), actor_name))
            .map(|actor| actor.joined_movies().to_vec())
            .unwrap_or_default()
    }

    /// Ids of movies whose title equals the query or contains it as a
    /// whitespace-separated token. Linear scan over the sorted sequence.
    pub fn get_movie_ids_for_title(&self, title: &str) -> Vec<MovieId> {
        self.movies
            .iter()
            .filter(|movie| name_matches(movie.title(), title))
            .map(Movie::id)
            .collect()
    }

    /// Ids of movies whose stringified release year equals the query text.
    pub fn get_movie_ids_for_date(&self, date: &str) -> Vec<MovieId> {
        self.movies
            .iter()
            .filter(|movie| movie.year().to_string() == date)
            .map(Movie::id)
            .collect()
    }

    // ------------------------------------------------------------------
    // Neighbour navigation
    // ------------------------------------------------------------------

    /// Year of the movie immediately before `movie` in sort order; `None` at
    /// the boundary or when `movie` is not stored.
    pub fn get_date_of_previous_movie(&self, movie: &Movie) -> Option<Year> {
        let index = self.movie_position(movie)?;
        if index == 0 {
            return None;
        }
        Some(self.movies[index - 1].year())
    }

    /// Year of the movie immediately after `movie` in sort order; `None` at
    /// the boundary or when `movie` is not stored.
    pub fn get_date_of_next_movie(&self, movie: &Movie) -> Option<Year> {
        let index = self.movie_position(movie)?;
        self.movies.get(index + 1).map(Movie::year)
    }

    /// Binary search on the `(title, year)` key.
    fn movie_position(&self, movie: &Movie) -> Option<usize> {
        self.movies
            .binary_search_by(|stored| stored.sort_key().cmp(&movie.sort_key()))
            .ok()
    }

    // ------------------------------------------------------------------
    // Genres, directors, actors, dates
    // ------------------------------------------------------------------

    pub fn add_genre(&mut self, genre: Genre) {
        self.genres.push(genre);
    }

    pub fn get_genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn add_director(&mut self, director: Director) {
        self.directors.push(director);
    }

    pub fn get_directors(&self) -> &[Director] {
        &self.directors
    }

    pub fn add_actor(&mut self, actor: Actor) {
        self.actors.push(actor);
    }

    pub fn get_actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn add_date(&mut self, date: Year) {
        self.dates.push(date);
    }

    pub fn get_dates(&self) -> &[Year] {
        &self.dates
    }

    // ------------------------------------------------------------------
    // Comments
    // ------------------------------------------------------------------

    /// Ingest a comment, enforcing the bidirectional-linkage invariant: the
    /// comment must already be present in both its user's and its movie's
    /// comment lists. On failure the repository is left unmodified.
    pub fn add_comment(&mut self, comment: Comment) -> Result<(), RepositoryError> {
        let attached_to_user = self
            .get_user(&comment.username)
            .is_some_and(|user| user.comments().contains(&comment));
        if !attached_to_user {
            return Err(RepositoryError::CommentNotAttachedToUser);
        }

        let attached_to_movie = self
            .get_movie(comment.movie_id)
            .is_some_and(|movie| movie.comments().contains(&comment));
        if !attached_to_movie {
            return Err(RepositoryError::CommentNotAttachedToMovie);
        }

        self.comments.push(comment);
        Ok(())
    }

    pub fn get_comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Set a movie's image hyperlink, with an explicit error when the movie
    /// is not stored.
    pub fn add_image_link(&mut self, link: &str, movie_id: MovieId) -> Result<(), RepositoryError> {
        let movie = self
            .get_movie_mut(movie_id)
            .ok_or(RepositoryError::MovieNotFound(movie_id))?;
        movie.set_image_hyperlink(link);
        Ok(())
    }

    /// Borrow a stored user and a stored movie mutably at the same time, so
    /// the comment-posting path can run `make_comment` against both.
    pub fn get_user_and_movie_mut(
        &mut self,
        username: &str,
        movie_id: MovieId,
    ) -> (Option<&mut User>, Option<&mut Movie>) {
        let movie = self
            .movies_index
            .get(&movie_id)
            .copied()
            .map(|index| &mut self.movies[index]);
        let user = self
            .users
            .iter_mut()
            .find(|user| user.username() == username);
        (user, movie)
    }
}

/// Exact match, or the query is one whitespace-separated token of the stored
/// name.
fn name_matches(stored: &str, query: &str) -> bool {
    stored == query || stored.split_whitespace().any(|token| token == query)
}
