//! Flat, display-ready records projected from the entity graph.
//!
//! Presentation layers consume these instead of the entities themselves: all
//! cross-entity references are flattened into strings or sub-records, so a
//! record can be rendered (or serialized) with no further lookups.

use catalogue::{Actor, Comment, Director, Genre, MemoryRepository, Movie, MovieId, Year};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A movie flattened for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecord {
    pub id: MovieId,
    pub date: Year,
    pub title: String,
    pub description: String,
    pub hyperlink: String,
    pub image_hyperlink: String,
    pub comments: Vec<CommentRecord>,
    pub genres: Vec<GenreRecord>,
    pub rating: f64,
    pub votes: u32,
    pub metascore: String,
    pub director: String,
    /// Comma-joined actor names, in association order.
    pub actors: String,
    pub runtime_minutes: u32,
    pub revenue: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentRecord {
    pub username: String,
    pub movie_id: MovieId,
    pub comment_text: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreRecord {
    pub name: String,
    pub tagged_movies: Vec<MovieId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectorRecord {
    pub name: String,
    pub directed_movies: Vec<MovieId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorRecord {
    pub name: String,
    pub joined_movies: Vec<MovieId>,
}

/// Slim movie record for sidebar-style listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieSummary {
    pub date: Year,
    pub title: String,
    pub image_hyperlink: String,
}

pub fn movie_to_record(movie: &Movie, repo: &MemoryRepository) -> MovieRecord {
    let genres = movie
        .genres()
        .iter()
        .filter_map(|name| repo.get_genres().iter().find(|genre| genre.name() == name))
        .map(genre_to_record)
        .collect();

    MovieRecord {
        id: movie.id(),
        date: movie.year(),
        title: movie.title().to_string(),
        description: movie.description().to_string(),
        hyperlink: movie.hyperlink().to_string(),
        image_hyperlink: movie.image_hyperlink().to_string(),
        comments: comments_to_records(movie.comments()),
        genres,
        rating: movie.rating(),
        votes: movie.votes(),
        metascore: movie
            .metascore()
            .map_or_else(|| "N/A".to_string(), |score| score.to_string()),
        director: movie.director().unwrap_or_default().to_string(),
        actors: movie.actors().join(", "),
        runtime_minutes: movie.runtime_minutes(),
        revenue: movie
            .revenue_millions()
            .map_or_else(|| "N/A".to_string(), |revenue| format!("{revenue} Millions")),
    }
}

pub fn movies_to_records(movies: &[&Movie], repo: &MemoryRepository) -> Vec<MovieRecord> {
    movies
        .iter()
        .map(|movie| movie_to_record(movie, repo))
        .collect()
}

pub fn comment_to_record(comment: &Comment) -> CommentRecord {
    CommentRecord {
        username: comment.username.clone(),
        movie_id: comment.movie_id,
        comment_text: comment.text.clone(),
        timestamp: comment.timestamp,
    }
}

pub fn comments_to_records(comments: &[Comment]) -> Vec<CommentRecord> {
    comments.iter().map(comment_to_record).collect()
}

pub fn genre_to_record(genre: &Genre) -> GenreRecord {
    GenreRecord {
        name: genre.name().to_string(),
        tagged_movies: genre.tagged_movies().to_vec(),
    }
}

pub fn director_to_record(director: &Director) -> DirectorRecord {
    DirectorRecord {
        name: director.full_name().to_string(),
        directed_movies: director.directed_movies().to_vec(),
    }
}

pub fn actor_to_record(actor: &Actor) -> ActorRecord {
    ActorRecord {
        name: actor.full_name().to_string(),
        joined_movies: actor.joined_movies().to_vec(),
    }
}

pub fn movie_to_summary(movie: &Movie) -> MovieSummary {
    MovieSummary {
        date: movie.year(),
        title: movie.title().to_string(),
        image_hyperlink: movie.image_hyperlink().to_string(),
    }
}
