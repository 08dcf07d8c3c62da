//! End-to-end search flows against a temporary SQLite catalog.
//!
//! The catalog is created by the migrator and seeded through the entities;
//! search logs go to the in-memory store.

use std::sync::Arc;

use reelsearch::config::Config;
use reelsearch::db::Catalog;
use reelsearch::entities::{actor, category, film, film_actor, film_category};
use reelsearch::search_log::{MemorySearchLogStore, SearchLogStore};
use reelsearch::services::SearchError;
use reelsearch::state::SharedState;
use sea_orm::{ActiveValue::Set, EntityTrait};

async fn seeded_catalog() -> Catalog {
    let db_path =
        std::env::temp_dir().join(format!("reelsearch-flow-test-{}.db", uuid::Uuid::new_v4()));
    let catalog = Catalog::bootstrap(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to bootstrap catalog");

    let categories = [(1, "Action"), (2, "Sci-Fi"), (3, "Drama")];
    category::Entity::insert_many(categories.iter().map(|(id, name)| category::ActiveModel {
        category_id: Set(*id),
        name: Set((*name).to_string()),
    }))
    .exec(&catalog.conn)
    .await
    .expect("failed to seed categories");

    // 23 Matrix titles across 1999..=2003, all Sci-Fi.
    let mut films: Vec<(u16, String, u16, u8)> = (1..=23)
        .map(|i| (i, format!("MATRIX {i:02}"), 1999 + (i % 5), 2))
        .collect();
    films.extend([
        (30, "ACE GOLDFINGER".to_string(), 2001, 1),
        (31, "AMADEUS HOLY".to_string(), 2003, 1),
        (32, "ANTITRUST TOMATOES".to_string(), 2006, 1),
        (33, "BOOGIE AMELIE".to_string(), 1998, 1),
        (34, "CHICAGO NORTH".to_string(), 2002, 3),
    ]);

    film::Entity::insert_many(films.iter().map(|(id, title, year, _)| film::ActiveModel {
        film_id: Set(*id),
        title: Set(title.clone()),
        description: Set(None),
        release_year: Set(Some(*year)),
        rating: Set(Some("PG-13".to_string())),
    }))
    .exec(&catalog.conn)
    .await
    .expect("failed to seed films");

    film_category::Entity::insert_many(films.iter().map(|(id, _, _, category_id)| {
        film_category::ActiveModel {
            film_id: Set(*id),
            category_id: Set(*category_id),
        }
    }))
    .exec(&catalog.conn)
    .await
    .expect("failed to seed film categories");

    let actors = [(1, "PENELOPE", "GUINESS"), (2, "NICK", "WAHLBERG"), (3, "ED", "CHASE")];
    actor::Entity::insert_many(actors.iter().map(|(id, first, last)| actor::ActiveModel {
        actor_id: Set(*id),
        first_name: Set((*first).to_string()),
        last_name: Set((*last).to_string()),
    }))
    .exec(&catalog.conn)
    .await
    .expect("failed to seed actors");

    let casting = films
        .iter()
        .flat_map(|(id, ..)| actors.iter().map(move |(actor_id, ..)| (*id, *actor_id)));
    film_actor::Entity::insert_many(casting.map(|(film_id, actor_id)| film_actor::ActiveModel {
        actor_id: Set(actor_id),
        film_id: Set(film_id),
    }))
    .exec(&catalog.conn)
    .await
    .expect("failed to seed film actors");

    catalog
}

async fn spawn_state() -> (SharedState, Arc<MemorySearchLogStore>) {
    let catalog = seeded_catalog().await;
    let store = Arc::new(MemorySearchLogStore::new());
    let state = SharedState::from_parts(Config::default(), catalog, store.clone());
    (state, store)
}

#[tokio::test]
async fn test_title_search_pages_ten_ten_three() {
    let (state, store) = spawn_state().await;

    let mut outcome = state.search.search_title("Matrix").await.unwrap();
    assert_eq!(outcome.total(), 23);

    let mut sizes = vec![outcome.first_page.take().unwrap().movies.len()];
    while outcome.cursor.has_more() {
        let page = outcome
            .cursor
            .next_page(state.search.catalog())
            .await
            .unwrap();
        sizes.push(page.movies.len());
    }
    assert_eq!(sizes, vec![10, 10, 3]);

    assert!(matches!(
        outcome.cursor.next_page(state.search.catalog()).await,
        Err(SearchError::EndOfResults)
    ));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_pages_are_disjoint_and_ordered_by_title() {
    let (state, _) = spawn_state().await;

    let mut outcome = state.search.search_title("matrix").await.unwrap();
    let mut titles: Vec<String> = outcome
        .first_page
        .take()
        .unwrap()
        .movies
        .into_iter()
        .map(|m| m.title)
        .collect();
    while let Ok(page) = outcome.cursor.next_page(state.search.catalog()).await {
        titles.extend(page.movies.into_iter().map(|m| m.title));
    }

    let expected: Vec<String> = (1..=23).map(|i| format!("MATRIX {i:02}")).collect();
    assert_eq!(titles, expected);
}

#[tokio::test]
async fn test_movies_carry_genre_and_cast() {
    let (state, _) = spawn_state().await;

    let outcome = state.search.search_title("goldfinger").await.unwrap();
    let page = outcome.first_page.unwrap();
    let movie = &page.movies[0];

    assert_eq!(movie.title, "ACE GOLDFINGER");
    assert_eq!(movie.genre.as_deref(), Some("Action"));
    assert_eq!(movie.release_year, Some(2001));
    // Ordered by last name.
    assert_eq!(
        movie.actors,
        vec!["ED CHASE", "PENELOPE GUINESS", "NICK WAHLBERG"]
    );
}

#[tokio::test]
async fn test_genre_year_results_within_range() {
    let (state, store) = spawn_state().await;

    let outcome = state
        .search
        .search_genre_year("action", 2000, 2005)
        .await
        .unwrap();
    assert_eq!(outcome.total(), 2);

    let movies = outcome.first_page.unwrap().movies;
    let found: Vec<(&str, Option<i32>)> = movies
        .iter()
        .map(|m| (m.title.as_str(), m.release_year))
        .collect();
    assert_eq!(
        found,
        vec![("ACE GOLDFINGER", Some(2001)), ("AMADEUS HOLY", Some(2003))]
    );

    let entries = store.entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].signature, "genre_year:action:2000-2005");
    assert_eq!(entries[0].results_count, 2);
}

#[tokio::test]
async fn test_catalog_metadata() {
    let (state, _) = spawn_state().await;

    assert_eq!(
        state.search.genres().await.unwrap(),
        vec!["Action", "Drama", "Sci-Fi"]
    );

    let bounds = state.search.year_bounds().await.unwrap().unwrap();
    assert_eq!((bounds.min, bounds.max), (1998, 2006));
}

#[tokio::test]
async fn test_invalid_ranges_are_rejected_without_logging() {
    let (state, store) = spawn_state().await;

    let inverted = state.search.search_genre_year("Action", 2005, 2001).await;
    assert!(matches!(inverted, Err(SearchError::Validation(_))));

    let outside = state.search.search_genre_year("Action", 1990, 2001).await;
    assert!(matches!(outside, Err(SearchError::Validation(_))));

    let unknown = state.search.search_genre_year("Western", 2001, 2002).await;
    assert!(matches!(unknown, Err(SearchError::Validation(_))));

    assert!(store.is_empty());
}

#[tokio::test]
async fn test_statistics_rank_logged_searches() {
    let (state, store) = spawn_state().await;

    for text in ["Matrix", "matrix ", "Ace", "MATRIX"] {
        state.search.search_title(text).await.unwrap();
    }
    state
        .search
        .search_genre_year("Action", 2001, 2001)
        .await
        .unwrap();

    let popular = state.statistics.popular_queries(None).await.unwrap();
    assert_eq!(popular[0].signature, "title:matrix");
    assert_eq!(popular[0].count, 3);
    assert_eq!(popular.len(), 3);

    let recent = state.statistics.recent_queries(Some(2)).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].signature, "genre_year:action:2001-2001");

    assert_eq!(store.recent(10).await.unwrap().len(), 5);
}
