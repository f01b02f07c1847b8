//! Bulk loader: parses the delimited source files and populates a
//! `MemoryRepository` through the core's mutation API.
//!
//! Source files, one header row each, fields trimmed:
//! - `movies.csv`: id, title, genres, description, directors, actors, year,
//!   runtime, rating, votes, revenue-or-"N/A", metascore-or-"N/A"
//! - `users.csv`: local-id, username, raw password
//! - `comments.csv`: local-id, user-local-id, movie-id, text, timestamp
//!
//! Quoted fields may contain commas, so the loader carries its own small
//! RFC-4180-style line splitter. The three files are parsed in parallel with
//! Rayon, then inserted sequentially. Raw passwords are hashed here; the
//! model only ever stores the hash.

use crate::error::{LoadError, Result};
use crate::model::{
    Actor, Director, Genre, Movie, MovieId, User, Year, make_actor_association, make_comment,
    make_director_association, make_genre_association,
};
use crate::repository::MemoryRepository;
use chrono::NaiveDateTime;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const MOVIES_FILE: &str = "movies.csv";
const USERS_FILE: &str = "users.csv";
const COMMENTS_FILE: &str = "comments.csv";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse the three source files under `data_path` and populate `repo`.
///
/// Movies are inserted before any association referencing them, and users
/// before any comment referencing them, so every `make_*` call runs against
/// stored entities.
pub fn populate(data_path: &Path, repo: &mut MemoryRepository) -> Result<()> {
    let movies_path = data_path.join(MOVIES_FILE);
    let users_path = data_path.join(USERS_FILE);
    let comments_path = data_path.join(COMMENTS_FILE);

    let ((movie_rows, user_rows), comment_rows) = rayon::join(
        || {
            rayon::join(
                || parse_movies(&movies_path),
                || parse_users(&users_path),
            )
        },
        || parse_comments(&comments_path),
    );
    let movie_rows = movie_rows?;
    let user_rows = user_rows?;
    let comment_rows = comment_rows?;

    tracing::info!(
        movies = movie_rows.len(),
        users = user_rows.len(),
        comments = comment_rows.len(),
        "parsed catalogue source files"
    );

    load_movies_and_associations(movie_rows, repo)?;
    let users_by_local_id = load_users(user_rows, repo);
    load_comments(comment_rows, repo, &users_by_local_id)?;

    tracing::info!(
        movies = repo.number_of_movies(),
        genres = repo.get_genres().len(),
        directors = repo.get_directors().len(),
        actors = repo.get_actors().len(),
        "repository populated"
    );
    Ok(())
}

/// SHA-256 hex digest of a raw password.
fn hash_password(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    format!("{:x}", hasher.finalize())
}

// =============================================================================
// Row parsing
// =============================================================================

struct MovieRow {
    id: MovieId,
    title: String,
    genres: Vec<String>,
    description: String,
    directors: Vec<String>,
    actors: Vec<String>,
    year: Year,
    runtime: i64,
    rating: f64,
    votes: u32,
    revenue_millions: Option<f64>,
    metascore: Option<u32>,
}

struct UserRow {
    local_id: String,
    username: String,
    raw_password: String,
}

struct CommentRow {
    line: usize,
    user_local_id: String,
    movie_id: MovieId,
    text: String,
    timestamp: NaiveDateTime,
}

fn parse_movies(path: &Path) -> Result<Vec<MovieRow>> {
    let mut rows = Vec::new();
    for (line, fields) in read_rows(path, MOVIES_FILE, 12)? {
        rows.push(MovieRow {
            id: parse_field(&fields[0], "movie id", MOVIES_FILE, line)?,
            title: fields[1].to_lowercase(),
            genres: split_names(&fields[2]),
            description: fields[3].clone(),
            directors: split_names(&fields[4]),
            actors: split_names(&fields[5]),
            year: parse_field(&fields[6], "year", MOVIES_FILE, line)?,
            runtime: parse_field(&fields[7], "runtime", MOVIES_FILE, line)?,
            rating: parse_field(&fields[8], "rating", MOVIES_FILE, line)?,
            votes: parse_field(&fields[9], "votes", MOVIES_FILE, line)?,
            revenue_millions: parse_optional(&fields[10], "revenue", MOVIES_FILE, line)?,
            metascore: parse_optional(&fields[11], "metascore", MOVIES_FILE, line)?,
        });
    }
    Ok(rows)
}

fn parse_users(path: &Path) -> Result<Vec<UserRow>> {
    let mut rows = Vec::new();
    for (_, fields) in read_rows(path, USERS_FILE, 3)? {
        rows.push(UserRow {
            local_id: fields[0].clone(),
            username: fields[1].clone(),
            raw_password: fields[2].clone(),
        });
    }
    Ok(rows)
}

fn parse_comments(path: &Path) -> Result<Vec<CommentRow>> {
    let mut rows = Vec::new();
    for (line, fields) in read_rows(path, COMMENTS_FILE, 5)? {
        let timestamp = NaiveDateTime::parse_from_str(&fields[4], TIMESTAMP_FORMAT)
            .map_err(|err| LoadError::Parse {
                file: COMMENTS_FILE.to_string(),
                line,
                reason: format!("invalid timestamp {:?}: {err}", fields[4]),
            })?;
        rows.push(CommentRow {
            line,
            user_local_id: fields[1].clone(),
            movie_id: parse_field(&fields[2], "movie id", COMMENTS_FILE, line)?,
            text: fields[3].clone(),
            timestamp,
        });
    }
    Ok(rows)
}

/// Read a source file into `(line_number, fields)` rows, skipping the header
/// and empty lines and enforcing the expected field count.
fn read_rows(path: &Path, file: &str, expected: usize) -> Result<Vec<(usize, Vec<String>)>> {
    let content = fs::read_to_string(path)?;
    // Some exports carry a UTF-8 byte-order mark.
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let mut rows = Vec::new();
    for (index, line) in content.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_line(line);
        if fields.len() != expected {
            return Err(LoadError::FieldCountMismatch {
                file: file.to_string(),
                expected,
                found: fields.len(),
                line: index + 1,
            });
        }
        rows.push((index + 1, fields));
    }
    Ok(rows)
}

/// Split one comma-delimited line, honouring double-quoted fields (which may
/// contain commas and doubled quotes). Fields are trimmed.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Split a comma-separated name list, lowercased and trimmed, empties dropped.
fn split_names(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(|name| name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect()
}

fn parse_field<T>(value: &str, field: &'static str, file: &str, line: usize) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse().map_err(|err| LoadError::Parse {
        file: file.to_string(),
        line,
        reason: format!("invalid {field} {value:?}: {err}"),
    })
}

/// "N/A" means the source had no figure.
fn parse_optional<T>(value: &str, field: &'static str, file: &str, line: usize) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    if value == "N/A" {
        return Ok(None);
    }
    parse_field(value, field, file, line).map(Some)
}

// =============================================================================
// Repository population
// =============================================================================

/// Insertion-ordered mapping from entity name to associated movie ids. Built
/// once per load; one entity per unique name is created from it, so genres,
/// directors and actors are singletons within a populated repository.
#[derive(Default)]
struct NameIndex {
    order: Vec<String>,
    movie_ids: HashMap<String, Vec<MovieId>>,
}

impl NameIndex {
    fn record(&mut self, name: &str, movie_id: MovieId) {
        if !self.movie_ids.contains_key(name) {
            self.order.push(name.to_string());
        }
        self.movie_ids.entry(name.to_string()).or_default().push(movie_id);
    }

    fn into_entries(self) -> impl Iterator<Item = (String, Vec<MovieId>)> {
        let mut movie_ids = self.movie_ids;
        self.order.into_iter().map(move |name| {
            let ids = movie_ids.remove(&name).unwrap_or_default();
            (name, ids)
        })
    }
}

fn load_movies_and_associations(rows: Vec<MovieRow>, repo: &mut MemoryRepository) -> Result<()> {
    let mut genres = NameIndex::default();
    let mut directors = NameIndex::default();
    let mut actors = NameIndex::default();
    let mut years: Vec<Year> = Vec::new();

    for row in rows {
        for name in &row.genres {
            genres.record(name, row.id);
        }
        for name in &row.directors {
            directors.record(name, row.id);
        }
        for name in &row.actors {
            actors.record(name, row.id);
        }
        if !years.contains(&row.year) {
            years.push(row.year);
        }

        let mut movie = Movie::new(row.id, &row.title, row.year)?;
        movie.set_description(&row.description);
        movie.set_runtime_minutes(row.runtime)?;
        movie.set_rating(row.rating);
        movie.set_votes(row.votes);
        if let Some(revenue) = row.revenue_millions {
            movie.set_revenue_millions(revenue);
        }
        if let Some(metascore) = row.metascore {
            movie.set_metascore(metascore);
        }
        repo.add_movie(movie)?;
    }

    for year in years {
        repo.add_date(year);
    }

    for (name, movie_ids) in genres.into_entries() {
        let mut genre = Genre::new(&name)?;
        for movie_id in movie_ids {
            let movie = stored_movie(repo, movie_id)?;
            make_genre_association(movie, &mut genre)?;
        }
        repo.add_genre(genre);
    }

    for (name, movie_ids) in directors.into_entries() {
        let mut director = Director::new(&name)?;
        for movie_id in movie_ids {
            let movie = stored_movie(repo, movie_id)?;
            make_director_association(movie, &mut director);
        }
        repo.add_director(director);
    }

    for (name, movie_ids) in actors.into_entries() {
        let mut actor = Actor::new(&name)?;
        for movie_id in movie_ids {
            let movie = stored_movie(repo, movie_id)?;
            make_actor_association(movie, &mut actor)?;
        }
        repo.add_actor(actor);
    }

    Ok(())
}

fn stored_movie(repo: &mut MemoryRepository, movie_id: MovieId) -> Result<&mut Movie> {
    repo.get_movie_mut(movie_id)
        .ok_or_else(|| crate::error::RepositoryError::MovieNotFound(movie_id).into())
}

/// Add users, hashing their raw passwords, and return the file-local id to
/// username mapping the comment loader needs.
fn load_users(rows: Vec<UserRow>, repo: &mut MemoryRepository) -> HashMap<String, String> {
    let mut users_by_local_id = HashMap::new();
    for row in rows {
        let user = User::new(&row.username, &hash_password(&row.raw_password));
        users_by_local_id.insert(row.local_id, user.username().to_string());
        repo.add_user(user);
    }
    users_by_local_id
}

fn load_comments(
    rows: Vec<CommentRow>,
    repo: &mut MemoryRepository,
    users_by_local_id: &HashMap<String, String>,
) -> Result<()> {
    for row in rows {
        let username = users_by_local_id.get(&row.user_local_id).ok_or_else(|| {
            LoadError::Parse {
                file: COMMENTS_FILE.to_string(),
                line: row.line,
                reason: format!("unknown user-local id {:?}", row.user_local_id),
            }
        })?;

        let (user, movie) = repo.get_user_and_movie_mut(username, row.movie_id);
        let (Some(user), Some(movie)) = (user, movie) else {
            return Err(LoadError::Parse {
                file: COMMENTS_FILE.to_string(),
                line: row.line,
                reason: format!("comment references unknown movie {}", row.movie_id),
            });
        };

        let comment = make_comment(&row.text, user, movie, row.timestamp.and_utc());
        repo.add_comment(comment)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_csv_line_handles_quoted_commas() {
        let fields = split_csv_line(r#"1,Moana,"Animation,Adventure,Comedy","Moana, chosen one.",Ron Clements"#);
        assert_eq!(
            fields,
            [
                "1",
                "Moana",
                "Animation,Adventure,Comedy",
                "Moana, chosen one.",
                "Ron Clements"
            ]
        );
    }

    #[test]
    fn test_split_csv_line_unescapes_doubled_quotes() {
        let fields = split_csv_line(r#"1,"He said ""hi""",x"#);
        assert_eq!(fields, ["1", r#"He said "hi""#, "x"]);
    }

    #[test]
    fn test_split_names_lowercases_and_trims() {
        assert_eq!(
            split_names("Chris Pratt, Vin Diesel , "),
            ["chris pratt", "vin diesel"]
        );
    }

    #[test]
    fn test_hash_password_is_hex_digest() {
        let hash = hash_password("cLQ^C#oFXloS");
        assert_eq!(hash.len(), 64);
        assert_ne!(hash, hash_password("something else"));
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_name_index_preserves_first_seen_order() {
        let mut index = NameIndex::default();
        index.record("drama", 2);
        index.record("action", 1);
        index.record("drama", 3);

        let entries: Vec<(String, Vec<MovieId>)> = index.into_entries().collect();
        assert_eq!(
            entries,
            [
                ("drama".to_string(), vec![2, 3]),
                ("action".to_string(), vec![1])
            ]
        );
    }
}
