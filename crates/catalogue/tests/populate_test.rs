//! End-to-end tests: load the bundled 20-movie fixture and exercise the
//! repository queries against it.

use catalogue::{loader, make_comment, MemoryRepository, Movie, MovieId, User};
use chrono::Utc;
use std::path::PathBuf;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

fn populated_repo() -> MemoryRepository {
    let mut repo = MemoryRepository::new();
    loader::populate(&fixture_dir(), &mut repo).expect("fixture should load");
    repo
}

#[test]
fn test_fixture_loads_twenty_movies() {
    let repo = populated_repo();
    assert_eq!(repo.number_of_movies(), 20);
    assert_eq!(repo.get_users().len(), 3);
    assert_eq!(repo.get_comments().len(), 2);
}

#[test]
fn test_first_movie_is_id_one_regardless_of_sort_position() {
    let repo = populated_repo();

    // "arrival" sorts first, but first/last key off raw id.
    let first = repo.get_first_movie().unwrap();
    assert_eq!(first.id(), 1);
    assert_eq!(first.title(), "guardians of the galaxy");

    let last = repo.get_last_movie().unwrap();
    assert_eq!(last.id(), 20);
    assert_eq!(last.title(), "arrival");
}

#[test]
fn test_movie_fields_come_through_the_loader() {
    let repo = populated_repo();
    let movie = repo.get_movie(1).unwrap();

    assert_eq!(movie.title(), "guardians of the galaxy");
    assert_eq!(movie.year(), 2014);
    assert_eq!(movie.runtime_minutes(), 121);
    assert_eq!(movie.rating(), 8.1);
    assert_eq!(movie.votes(), 757_074);
    assert_eq!(movie.revenue_millions(), Some(333.13));
    assert_eq!(movie.metascore(), Some(76));
    assert_eq!(movie.director(), Some("james gunn"));
    assert_eq!(
        movie.actors(),
        ["chris pratt", "vin diesel", "bradley cooper", "zoe saldana"]
    );
    assert!(movie.genres().contains(&"action".to_string()));
    assert!(movie.genres().contains(&"adventure".to_string()));
}

#[test]
fn test_not_available_fields_stay_absent() {
    let repo = populated_repo();
    let mindhorn = repo.get_movie(8).unwrap();

    assert_eq!(mindhorn.revenue_millions(), None);
    assert_eq!(mindhorn.metascore(), Some(71));
}

#[test]
fn test_genre_counts_from_fixture() {
    let repo = populated_repo();
    let genres = repo.get_genres();
    assert_eq!(genres.len(), 15);

    let count = |name: &str| {
        genres
            .iter()
            .find(|genre| genre.name() == name)
            .map(|genre| genre.number_of_tagged_movies())
            .unwrap_or(0)
    };
    assert_eq!(count("action"), 7);
    assert_eq!(count("adventure"), 10);
    assert_eq!(count("horror"), 1);
    assert_eq!(count("comedy"), 6);
}

#[test]
fn test_movie_ids_for_genre_in_association_order() {
    let repo = populated_repo();

    assert_eq!(
        repo.get_movie_ids_for_genre("action"),
        [1, 5, 6, 9, 13, 15, 18]
    );
    assert!(repo.get_movie_ids_for_genre("United States").is_empty());
}

#[test]
fn test_movies_by_id_from_fixture() {
    let repo = populated_repo();

    let movies = repo.get_movies_by_id(&[2, 5, 6]);
    let titles: Vec<&str> = movies.iter().map(|movie| movie.title()).collect();
    assert_eq!(titles, ["prometheus", "suicide squad", "the great wall"]);

    let movies = repo.get_movies_by_id(&[2, 1001]);
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title(), "prometheus");
}

#[test]
fn test_director_and_actor_token_queries() {
    let repo = populated_repo();

    assert_eq!(repo.get_movie_ids_for_director("villeneuve"), [20]);
    // Matt Damon appears in The Great Wall (6) and Jason Bourne (18).
    assert_eq!(repo.get_movie_ids_for_actor("matt damon"), [6, 18]);
    assert_eq!(repo.get_movie_ids_for_actor("damon"), [6, 18]);
}

#[test]
fn test_title_and_date_queries() {
    let repo = populated_repo();

    assert_eq!(repo.get_movie_ids_for_title("jason bourne"), [18]);
    assert_eq!(repo.get_movie_ids_for_title("bourne"), [18]);
    assert_eq!(repo.get_movie_ids_for_date("2012"), [2]);
    assert_eq!(repo.get_movie_ids_for_date("2014"), [1]);
    assert!(repo.get_movie_ids_for_date("2015").is_empty());
}

#[test]
fn test_neighbour_dates_from_fixture() {
    let repo = populated_repo();

    // "the great wall" is preceded by "suicide squad" (2016) in sort order.
    let great_wall = repo.get_movie(6).unwrap();
    assert_eq!(repo.get_date_of_previous_movie(great_wall), Some(2016));

    // "split" is followed by "suicide squad" (2016).
    let split = repo.get_movie(3).unwrap();
    assert_eq!(repo.get_date_of_next_movie(split), Some(2016));

    // Boundaries of the sorted sequence.
    let sorted = repo.get_movies();
    assert_eq!(repo.get_date_of_previous_movie(&sorted[0]), None);
    assert_eq!(repo.get_date_of_next_movie(&sorted[19]), None);
}

#[test]
fn test_comments_are_linked_to_users_and_movie() {
    let repo = populated_repo();
    let movie = repo.get_movie(1).unwrap();
    let comments = movie.comments();

    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].username, "fmercury");
    assert_eq!(comments[0].text, "This film is good!");
    assert_eq!(comments[1].username, "thorke");
    assert_eq!(comments[1].text, "Yes! I like it!");

    let fmercury = repo.get_user("fmercury").unwrap();
    assert_eq!(fmercury.comments().len(), 1);
}

#[test]
fn test_loader_hashes_passwords() {
    let repo = populated_repo();
    let user = repo.get_user("thorke").unwrap();

    assert_ne!(user.password(), "cLQ^C#oFXloS");
    assert_eq!(user.password().len(), 64);
}

#[test]
fn test_dates_are_recorded_once_per_year() {
    let repo = populated_repo();
    assert_eq!(repo.get_dates(), [2014, 2012, 2016]);
}

#[test]
fn test_comment_round_trip_after_load() {
    let mut repo = populated_repo();
    repo.add_user(User::new("dave", "123456789"));

    let (user, movie) = repo.get_user_and_movie_mut("dave", 2);
    let comment = make_comment("Still holds up.", user.unwrap(), movie.unwrap(), Utc::now());
    repo.add_comment(comment.clone()).unwrap();

    assert_eq!(repo.get_comments().len(), 3);
    assert!(repo.get_movie(2).unwrap().comments().contains(&comment));
}

#[test]
fn test_can_add_movie_after_load() {
    let mut repo = populated_repo();
    let movie = Movie::new(1001, "test movie", 1997).unwrap();
    repo.add_movie(movie).unwrap();

    assert_eq!(repo.get_movie(1001).unwrap().title(), "test movie");
    assert_eq!(repo.number_of_movies(), 21);
}

#[test]
fn test_sorted_order_spot_check() {
    let repo = populated_repo();
    let titles: Vec<&str> = repo.get_movies().iter().map(|movie| movie.title()).collect();

    assert_eq!(titles[0], "arrival");
    assert_eq!(titles[19], "the secret life of pets");

    let mut sorted_ids: Vec<MovieId> = Vec::new();
    for movie in repo.get_movies() {
        sorted_ids.push(movie.id());
    }
    assert_eq!(sorted_ids[0], 20);
    assert_eq!(sorted_ids[3], 1);
}
