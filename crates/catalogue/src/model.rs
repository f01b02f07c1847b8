//! Core domain types for the movie catalogue.
//!
//! This module defines the entities (Movie, Genre, Director, Actor, User,
//! Comment) and the association helpers that are the *only* sanctioned way to
//! create cross-entity relationships. Every bidirectional link (movie-genre,
//! movie-actor, movie-director, user-comment, movie-comment) is stored as two
//! owned collections of keys, and the `make_*` helpers always update both
//! sides so a link is never partially established.
//!
//! Entities refer to each other by id or name rather than by shared pointers;
//! the repository owns every entity and resolves the keys.

use crate::error::ModelError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie (positive, assigned by the source data).
pub type MovieId = u32;

/// Release year of a movie (1900 or later).
pub type Year = u16;

// =============================================================================
// Comment
// =============================================================================

/// A user's comment on a movie.
///
/// Immutable once created; equality is full-field. Comments are built through
/// [`make_comment`], which wires the comment into both the user's and the
/// movie's comment lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub username: String,
    pub movie_id: MovieId,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// Movie
// =============================================================================

/// A movie in the catalogue.
///
/// Movies order by `(title, year)`: primarily by title, by year when titles
/// match. That key also defines equality. The repository keeps its movie
/// sequence sorted by this ordering, not by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    id: MovieId,
    title: String,
    year: Year,
    description: String,
    runtime_minutes: u32,
    rating: f64,
    votes: u32,
    revenue_millions: Option<f64>,
    metascore: Option<u32>,
    hyperlink: String,
    image_hyperlink: String,
    genres: Vec<String>,
    actors: Vec<String>,
    director: Option<String>,
    comments: Vec<Comment>,
}

impl Movie {
    /// Create a movie, validating identity fields at construction.
    ///
    /// Fails when the id is zero, the title is empty after trimming, or the
    /// year predates 1900.
    pub fn new(id: MovieId, title: &str, year: Year) -> Result<Self, ModelError> {
        if id == 0 {
            return Err(ModelError::InvalidMovieId);
        }
        let title = title.trim();
        if title.is_empty() {
            return Err(ModelError::EmptyTitle);
        }
        if year < 1900 {
            return Err(ModelError::YearTooEarly(year));
        }
        Ok(Self {
            id,
            title: title.to_string(),
            year,
            description: String::new(),
            runtime_minutes: 0,
            rating: 0.0,
            votes: 0,
            revenue_millions: None,
            metascore: None,
            hyperlink: derive_hyperlink(title),
            image_hyperlink: String::new(),
            genres: Vec::new(),
            actors: Vec::new(),
            director: None,
            comments: Vec::new(),
        })
    }

    pub fn id(&self) -> MovieId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Release year. Named `date` in the query vocabulary.
    pub fn year(&self) -> Year {
        self.year
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.trim().to_string();
    }

    pub fn runtime_minutes(&self) -> u32 {
        self.runtime_minutes
    }

    /// Set the runtime, rejecting negative values.
    pub fn set_runtime_minutes(&mut self, minutes: i64) -> Result<(), ModelError> {
        if minutes < 0 {
            return Err(ModelError::NegativeRuntime(minutes));
        }
        self.runtime_minutes = minutes as u32;
        Ok(())
    }

    /// Rating on a 0-10 scale, rounded to 2 decimals. The stored value keeps
    /// full precision.
    pub fn rating(&self) -> f64 {
        (self.rating * 100.0).round() / 100.0
    }

    pub fn set_rating(&mut self, rating: f64) {
        self.rating = rating;
    }

    pub fn votes(&self) -> u32 {
        self.votes
    }

    pub fn set_votes(&mut self, votes: u32) {
        self.votes = votes;
    }

    /// Box-office revenue in millions; `None` when the source had no figure.
    pub fn revenue_millions(&self) -> Option<f64> {
        self.revenue_millions
    }

    pub fn set_revenue_millions(&mut self, revenue: f64) {
        self.revenue_millions = Some(revenue);
    }

    pub fn metascore(&self) -> Option<u32> {
        self.metascore
    }

    pub fn set_metascore(&mut self, metascore: u32) {
        self.metascore = Some(metascore);
    }

    /// Search hyperlink derived from the title at construction.
    pub fn hyperlink(&self) -> &str {
        &self.hyperlink
    }

    pub fn image_hyperlink(&self) -> &str {
        &self.image_hyperlink
    }

    pub fn set_image_hyperlink(&mut self, link: &str) {
        self.image_hyperlink = link.to_string();
    }

    /// Genre names applied to this movie, in association order.
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Actor names attached to this movie, in association order.
    pub fn actors(&self) -> &[String] {
        &self.actors
    }

    /// The movie's single director, if one has been associated.
    pub fn director(&self) -> Option<&str> {
        self.director.as_deref()
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// The `(title, year)` key the repository sorts by.
    pub fn sort_key(&self) -> (&str, Year) {
        (&self.title, self.year)
    }
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for Movie {}

impl PartialOrd for Movie {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Movie {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

fn derive_hyperlink(title: &str) -> String {
    format!("https://www.google.com/search?q={}", title.replace(' ', "+"))
}

// =============================================================================
// Genre
// =============================================================================

/// A genre, identified by its trimmed, non-empty name.
///
/// Owns the ordered list of movies tagged with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    name: String,
    tagged_movies: Vec<MovieId>,
}

impl Genre {
    pub fn new(name: &str) -> Result<Self, ModelError> {
        Ok(Self {
            name: validate_name(name, "genre")?,
            tagged_movies: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ids of tagged movies, in association order.
    pub fn tagged_movies(&self) -> &[MovieId] {
        &self.tagged_movies
    }

    pub fn number_of_tagged_movies(&self) -> usize {
        self.tagged_movies.len()
    }

    pub fn is_applied_to(&self, movie_id: MovieId) -> bool {
        self.tagged_movies.contains(&movie_id)
    }
}

impl PartialEq for Genre {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Genre {}

impl PartialOrd for Genre {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Genre {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

// =============================================================================
// Director
// =============================================================================

/// A director, identified by full name. Owns the ordered list of directed
/// movies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Director {
    full_name: String,
    directed_movies: Vec<MovieId>,
}

impl Director {
    pub fn new(full_name: &str) -> Result<Self, ModelError> {
        Ok(Self {
            full_name: validate_name(full_name, "director")?,
            directed_movies: Vec::new(),
        })
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn directed_movies(&self) -> &[MovieId] {
        &self.directed_movies
    }
}

impl PartialEq for Director {
    fn eq(&self, other: &Self) -> bool {
        self.full_name == other.full_name
    }
}

impl Eq for Director {}

impl PartialOrd for Director {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Director {
    fn cmp(&self, other: &Self) -> Ordering {
        self.full_name.cmp(&other.full_name)
    }
}

// =============================================================================
// Actor
// =============================================================================

/// An actor, identified by full name. Owns the ordered list of joined movies
/// and a set of colleague names built from co-appearances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    full_name: String,
    joined_movies: Vec<MovieId>,
    colleagues: BTreeSet<String>,
}

impl Actor {
    pub fn new(full_name: &str) -> Result<Self, ModelError> {
        Ok(Self {
            full_name: validate_name(full_name, "actor")?,
            joined_movies: Vec::new(),
            colleagues: BTreeSet::new(),
        })
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn joined_movies(&self) -> &[MovieId] {
        &self.joined_movies
    }

    pub fn joined(&self, movie_id: MovieId) -> bool {
        self.joined_movies.contains(&movie_id)
    }

    /// Record a co-appearance. One-directional: the caller decides whether to
    /// add the reverse link as well.
    pub fn add_colleague(&mut self, colleague: &Actor) {
        self.colleagues.insert(colleague.full_name.clone());
    }

    pub fn has_worked_with(&self, other: &Actor) -> bool {
        self.colleagues.contains(&other.full_name)
    }
}

impl PartialEq for Actor {
    fn eq(&self, other: &Self) -> bool {
        self.full_name == other.full_name
    }
}

impl Eq for Actor {}

impl PartialOrd for Actor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Actor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.full_name.cmp(&other.full_name)
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered user. The password is pre-hashed by the loader; the model
/// never sees raw credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    username: String,
    password: String,
    comments: Vec<Comment>,
    watched_movies: Vec<MovieId>,
    reviews: Vec<String>,
    time_spent_watching_movies_minutes: u32,
}

impl User {
    pub fn new(username: &str, password_hash: &str) -> Self {
        Self {
            username: username.trim().to_string(),
            password: password_hash.to_string(),
            comments: Vec::new(),
            watched_movies: Vec::new(),
            reviews: Vec::new(),
            time_spent_watching_movies_minutes: 0,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Comments posted by this user, in posting order.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn watched_movies(&self) -> &[MovieId] {
        &self.watched_movies
    }

    pub fn reviews(&self) -> &[String] {
        &self.reviews
    }

    pub fn time_spent_watching_movies_minutes(&self) -> u32 {
        self.time_spent_watching_movies_minutes
    }

    /// Record a watched movie and accumulate its runtime.
    pub fn watch_movie(&mut self, movie: &Movie) {
        self.watched_movies.push(movie.id());
        self.time_spent_watching_movies_minutes += movie.runtime_minutes();
    }

    pub fn add_review(&mut self, review: &str) {
        self.reviews.push(review.to_string());
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.username == other.username
    }
}

impl Eq for User {}

fn validate_name(name: &str, entity: &'static str) -> Result<String, ModelError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ModelError::EmptyName { entity });
    }
    Ok(name.to_string())
}

// =============================================================================
// Association helpers
// =============================================================================

/// Create a comment and attach it to both the user and the movie.
///
/// This is the only way to build a comment with intact bidirectional links;
/// the repository refuses comments that were not wired through here.
pub fn make_comment(
    text: &str,
    user: &mut User,
    movie: &mut Movie,
    timestamp: DateTime<Utc>,
) -> Comment {
    let comment = Comment {
        username: user.username.clone(),
        movie_id: movie.id,
        text: text.to_string(),
        timestamp,
    };
    user.comments.push(comment.clone());
    movie.comments.push(comment.clone());
    comment
}

/// Tag a movie with a genre, updating both sides.
///
/// Fails without side effect if the genre is already applied to the movie.
pub fn make_genre_association(movie: &mut Movie, genre: &mut Genre) -> Result<(), ModelError> {
    if genre.is_applied_to(movie.id) {
        return Err(ModelError::GenreAlreadyApplied {
            genre: genre.name.clone(),
            title: movie.title.clone(),
        });
    }
    movie.genres.push(genre.name.clone());
    genre.tagged_movies.push(movie.id);
    Ok(())
}

/// Associate a director with a movie.
///
/// A movie has exactly one director, so the movie-side reference is simply
/// overwritten; there is no duplicate check.
pub fn make_director_association(movie: &mut Movie, director: &mut Director) {
    movie.director = Some(director.full_name.clone());
    director.directed_movies.push(movie.id);
}

/// Add an actor to a movie's cast, updating both sides.
///
/// Fails without side effect if the actor already joined the movie.
pub fn make_actor_association(movie: &mut Movie, actor: &mut Actor) -> Result<(), ModelError> {
    if actor.joined(movie.id) {
        return Err(ModelError::ActorAlreadyJoined {
            actor: actor.full_name.clone(),
            title: movie.title.clone(),
        });
    }
    movie.actors.push(actor.full_name.clone());
    actor.joined_movies.push(movie.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId, title: &str, year: Year) -> Movie {
        Movie::new(id, title, year).unwrap()
    }

    #[test]
    fn test_movie_construction_validates_identity() {
        assert_eq!(Movie::new(0, "up", 2009).unwrap_err(), ModelError::InvalidMovieId);
        assert_eq!(Movie::new(1, "   ", 2009).unwrap_err(), ModelError::EmptyTitle);
        assert_eq!(
            Movie::new(1, "up", 1899).unwrap_err(),
            ModelError::YearTooEarly(1899)
        );

        let m = movie(1, "  moana  ", 2016);
        assert_eq!(m.title(), "moana");
        assert_eq!(m.hyperlink(), "https://www.google.com/search?q=moana");
    }

    #[test]
    fn test_movie_runtime_rejects_negative() {
        let mut m = movie(1, "moana", 2016);
        assert_eq!(
            m.set_runtime_minutes(-5).unwrap_err(),
            ModelError::NegativeRuntime(-5)
        );
        m.set_runtime_minutes(107).unwrap();
        assert_eq!(m.runtime_minutes(), 107);
    }

    #[test]
    fn test_movie_rating_exposed_rounded() {
        let mut m = movie(1, "moana", 2016);
        m.set_rating(7.666_66);
        assert_eq!(m.rating(), 7.67);
    }

    #[test]
    fn test_movie_ordering_by_title_then_year() {
        let a = movie(3, "arrival", 2016);
        let b = movie(1, "moana", 2016);
        let c = movie(2, "moana", 2020);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(b, movie(99, "moana", 2016));
    }

    #[test]
    fn test_make_comment_links_both_sides() {
        let mut user = User::new("thorke", "hash");
        let mut m = movie(2, "prometheus", 2012);

        let comment = make_comment("A classic.", &mut user, &mut m, Utc::now());

        assert!(user.comments().contains(&comment));
        assert!(m.comments().contains(&comment));
        assert_eq!(comment.username, "thorke");
        assert_eq!(comment.movie_id, 2);
    }

    #[test]
    fn test_genre_association_rejects_duplicates() {
        let mut m = movie(1, "moana", 2016);
        let mut genre = Genre::new("animation").unwrap();

        make_genre_association(&mut m, &mut genre).unwrap();
        let err = make_genre_association(&mut m, &mut genre).unwrap_err();

        assert!(matches!(err, ModelError::GenreAlreadyApplied { .. }));
        assert_eq!(m.genres().len(), 1);
        assert_eq!(genre.number_of_tagged_movies(), 1);
    }

    #[test]
    fn test_actor_association_rejects_duplicates() {
        let mut m = movie(1, "moana", 2016);
        let mut actor = Actor::new("dwayne johnson").unwrap();

        make_actor_association(&mut m, &mut actor).unwrap();
        let err = make_actor_association(&mut m, &mut actor).unwrap_err();

        assert!(matches!(err, ModelError::ActorAlreadyJoined { .. }));
        assert_eq!(m.actors().len(), 1);
        assert_eq!(actor.joined_movies(), &[1]);
    }

    #[test]
    fn test_director_association_overwrites() {
        let mut m = movie(1, "moana", 2016);
        let mut first = Director::new("ron clements").unwrap();
        let mut second = Director::new("john musker").unwrap();

        make_director_association(&mut m, &mut first);
        make_director_association(&mut m, &mut second);

        assert_eq!(m.director(), Some("john musker"));
        assert_eq!(first.directed_movies(), &[1]);
        assert_eq!(second.directed_movies(), &[1]);
    }

    #[test]
    fn test_name_validation() {
        assert!(Genre::new("  ").is_err());
        assert!(Director::new("").is_err());
        assert!(Actor::new("\t").is_err());
        assert_eq!(Genre::new(" action ").unwrap().name(), "action");
    }

    #[test]
    fn test_actor_colleagues_one_directional() {
        let mut angelina = Actor::new("angelina jolie").unwrap();
        let jack = Actor::new("jack black").unwrap();

        angelina.add_colleague(&jack);

        assert!(angelina.has_worked_with(&jack));
        assert!(!jack.has_worked_with(&angelina));
    }

    #[test]
    fn test_user_watch_history_accumulates_runtime() {
        let mut user = User::new("mjackson", "hash");
        let mut m = movie(1, "moana", 2016);
        m.set_runtime_minutes(107).unwrap();

        user.watch_movie(&m);
        user.watch_movie(&m);
        user.add_review("see it on the big screen");

        assert_eq!(user.watched_movies(), &[1, 1]);
        assert_eq!(user.time_spent_watching_movies_minutes(), 214);
        assert_eq!(user.reviews(), &["see it on the big screen".to_string()]);
    }
}
