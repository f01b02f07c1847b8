use anyhow::{bail, Context, Result};
use catalogue::{loader, MemoryRepository, MovieId};
use clap::{Parser, Subcommand};
use colored::Colorize;
use services::{movies, utilities, MovieRecord};
use std::path::PathBuf;
use std::time::Instant;

/// Movie Catalogue - browse, search and comment on movies
#[derive(Parser)]
#[command(name = "movie-catalogue")]
#[command(about = "Browse an in-memory movie catalogue", long_about = None)]
struct Cli {
    /// Path to the catalogue data directory
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Page through the catalogue in title order
    Browse {
        /// Offset into the full id list
        #[arg(long, default_value = "0")]
        cursor: usize,

        /// Number of movies per page
        #[arg(long, default_value = "10")]
        page_size: usize,
    },

    /// Search movies by exactly one of genre, director, actor, title or date
    Search {
        #[arg(long)]
        genre: Option<String>,

        #[arg(long)]
        director: Option<String>,

        #[arg(long)]
        actor: Option<String>,

        #[arg(long)]
        title: Option<String>,

        /// Release year, e.g. 2016
        #[arg(long)]
        date: Option<String>,

        #[arg(long, default_value = "0")]
        cursor: usize,

        #[arg(long, default_value = "10")]
        page_size: usize,
    },

    /// Show one movie in full, including its comments
    Show {
        /// Movie id to display
        #[arg(long)]
        id: MovieId,

        /// Emit the record as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Post a comment on a movie
    Comment {
        /// Movie id to comment on
        #[arg(long)]
        id: MovieId,

        /// Username of the commenting user
        #[arg(long)]
        user: String,

        /// Comment text
        #[arg(long)]
        text: String,
    },

    /// Show a random selection of movies
    Random {
        /// Number of movies to pick
        #[arg(long, default_value = "5")]
        count: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the catalogue (this may take a moment)
    println!("Loading catalogue from {}...", cli.data_dir.display());
    let start = Instant::now();
    let mut repo = MemoryRepository::new();
    loader::populate(&cli.data_dir, &mut repo).context("Failed to load catalogue data")?;
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        repo.number_of_movies(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Browse { cursor, page_size } => handle_browse(&repo, cursor, page_size),
        Commands::Search {
            genre,
            director,
            actor,
            title,
            date,
            cursor,
            page_size,
        } => handle_search(&repo, genre, director, actor, title, date, cursor, page_size),
        Commands::Show { id, json } => handle_show(&repo, id, json),
        Commands::Comment { id, user, text } => handle_comment(&mut repo, id, &user, &text),
        Commands::Random { count } => handle_random(&repo, count),
    }
}

/// Handle the 'browse' command
fn handle_browse(repo: &MemoryRepository, cursor: usize, page_size: usize) -> Result<()> {
    let ids: Vec<MovieId> = repo.get_movies().iter().map(|movie| movie.id()).collect();
    let page = page_of(&ids, cursor, page_size);
    let records = movies::get_movies_by_id(page, repo);

    println!(
        "{}",
        format!("Movies {}-{} of {}:", cursor, cursor + records.len(), ids.len())
            .bold()
            .blue()
    );
    print_movie_lines(&records, cursor);
    Ok(())
}

/// Handle the 'search' command
#[allow(clippy::too_many_arguments)]
fn handle_search(
    repo: &MemoryRepository,
    genre: Option<String>,
    director: Option<String>,
    actor: Option<String>,
    title: Option<String>,
    date: Option<String>,
    cursor: usize,
    page_size: usize,
) -> Result<()> {
    let filters = [&genre, &director, &actor, &title, &date];
    if filters.iter().filter(|filter| filter.is_some()).count() != 1 {
        bail!("Provide exactly one of --genre, --director, --actor, --title or --date");
    }

    let (label, ids) = if let Some(genre) = genre {
        ("genre", movies::get_movie_ids_for_genre(&genre, repo))
    } else if let Some(director) = director {
        ("director", movies::get_movie_ids_for_director(&director, repo))
    } else if let Some(actor) = actor {
        ("actor", movies::get_movie_ids_for_actor(&actor, repo))
    } else if let Some(title) = title {
        ("title", movies::get_movie_ids_for_title(&title, repo))
    } else if let Some(date) = date {
        ("date", movies::get_movie_ids_for_date(&date, repo))
    } else {
        unreachable!("exactly one filter was checked above")
    };

    if ids.is_empty() {
        println!("No movies matched that {label}.");
        return Ok(());
    }

    let page = page_of(&ids, cursor, page_size);
    let records = movies::get_movies_by_id(page, repo);
    println!(
        "{}",
        format!("{} matches, showing {}-{}:", ids.len(), cursor, cursor + records.len())
            .bold()
            .blue()
    );
    print_movie_lines(&records, cursor);
    Ok(())
}

/// Handle the 'show' command
fn handle_show(repo: &MemoryRepository, id: MovieId, json: bool) -> Result<()> {
    let record = movies::get_movie(id, repo)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("{}", format!("{} ({})", record.title, record.date).bold().blue());
    println!("{}Rating: {} ({} votes)", "• ".green(), record.rating, record.votes);
    println!("{}Metascore: {}", "• ".green(), record.metascore);
    println!("{}Director: {}", "• ".green(), record.director);
    println!("{}Actors: {}", "• ".green(), record.actors);
    println!("{}Runtime: {} min", "• ".green(), record.runtime_minutes);
    println!("{}Revenue: {}", "• ".green(), record.revenue);
    let genre_names: Vec<&str> = record.genres.iter().map(|genre| genre.name.as_str()).collect();
    println!("{}Genres: {}", "• ".green(), genre_names.join(", "));
    println!("{}", record.description);

    if record.comments.is_empty() {
        println!("No comments yet.");
    } else {
        println!("{}", "Comments:".bold());
        for comment in &record.comments {
            println!(
                "  {} {}: {}",
                comment.timestamp.format("%Y-%m-%d"),
                comment.username.cyan(),
                comment.comment_text
            );
        }
    }
    Ok(())
}

/// Handle the 'comment' command
fn handle_comment(repo: &mut MemoryRepository, id: MovieId, user: &str, text: &str) -> Result<()> {
    movies::add_comment(id, text, user, repo)?;
    let record = movies::get_movie(id, repo)?;
    println!(
        "{} {} commented on {}",
        "✓".green(),
        user.cyan(),
        record.title.bold()
    );
    Ok(())
}

/// Handle the 'random' command
fn handle_random(repo: &MemoryRepository, count: usize) -> Result<()> {
    let picks = utilities::get_random_movies(count, repo);

    println!("{}", "Random picks:".bold().blue());
    for pick in picks {
        println!("  {} ({})", pick.title, pick.date);
    }
    Ok(())
}

/// Slice `[cursor..cursor + page_size]` out of the full id list.
fn page_of(ids: &[MovieId], cursor: usize, page_size: usize) -> &[MovieId] {
    let start = cursor.min(ids.len());
    let end = (cursor.saturating_add(page_size)).min(ids.len());
    &ids[start..end]
}

/// Print one line per movie record, numbered from `cursor + 1`.
fn print_movie_lines(records: &[MovieRecord], cursor: usize) {
    for (offset, record) in records.iter().enumerate() {
        let genre_names: Vec<&str> =
            record.genres.iter().map(|genre| genre.name.as_str()).collect();
        println!(
            "{}. {} ({}) [{}] - {:.2}",
            (cursor + offset + 1).to_string().green(),
            record.title,
            record.date,
            genre_names.join(", "),
            record.rating
        );
    }
}
