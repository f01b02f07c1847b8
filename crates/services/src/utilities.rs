//! Sidebar-style listing services: name lists for building browse links, and
//! random movie picks for the featured section.

use crate::projections::{movie_to_summary, MovieSummary};
use catalogue::{MemoryRepository, MovieId, Year};

pub fn get_genre_names(repo: &MemoryRepository) -> Vec<String> {
    repo.get_genres()
        .iter()
        .map(|genre| genre.name().to_string())
        .collect()
}

pub fn get_director_names(repo: &MemoryRepository) -> Vec<String> {
    repo.get_directors()
        .iter()
        .map(|director| director.full_name().to_string())
        .collect()
}

pub fn get_actor_names(repo: &MemoryRepository) -> Vec<String> {
    repo.get_actors()
        .iter()
        .map(|actor| actor.full_name().to_string())
        .collect()
}

/// Movie titles in `(title, year)` sort order.
pub fn get_titles(repo: &MemoryRepository) -> Vec<String> {
    repo.get_movies()
        .iter()
        .map(|movie| movie.title().to_string())
        .collect()
}

pub fn get_dates(repo: &MemoryRepository) -> Vec<Year> {
    repo.get_dates().to_vec()
}

/// Pick `quantity` distinct random movies, as slim summaries.
///
/// Ids are sampled from `1..movie_count`; the quantity is reduced when the
/// repository holds too few movies.
pub fn get_random_movies(quantity: usize, repo: &MemoryRepository) -> Vec<MovieSummary> {
    let movie_count = repo.number_of_movies();
    if movie_count < 2 {
        return Vec::new();
    }
    let quantity = quantity.min(movie_count - 1);

    let mut rng = rand::rng();
    let ids: Vec<MovieId> = rand::seq::index::sample(&mut rng, movie_count - 1, quantity)
        .iter()
        .map(|offset| offset as MovieId + 1)
        .collect();

    repo.get_movies_by_id(&ids)
        .into_iter()
        .map(movie_to_summary)
        .collect()
}
