//! In-memory catalog and log stores for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::YearBounds;
use crate::models::{Movie, MovieQuery, QueryFrequency, SearchLogEntry, SearchQuery};
use crate::search_log::{LogStoreError, SearchLogStore};
use crate::services::catalog::{MovieCatalog, SearchError};

pub fn movie(id: i32, title: &str, genre: &str, year: i32) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        genre: Some(genre.to_string()),
        release_year: Some(year),
        description: None,
        rating: Some("PG".to_string()),
        actors: vec!["PENELOPE GUINESS".to_string()],
    }
}

/// `count` Matrix titles plus a handful of unrelated films.
pub fn matrix_catalog(count: i32) -> FixtureCatalog {
    let mut movies: Vec<Movie> = (1..=count)
        .map(|i| movie(i, &format!("MATRIX {i:02}"), "Sci-Fi", 1999 + (i % 5)))
        .collect();
    movies.push(movie(100, "ALIEN CENTER", "Horror", 2001));
    movies.push(movie(101, "ACADEMY DINOSAUR", "Documentary", 2006));
    FixtureCatalog::new(movies)
}

pub struct FixtureCatalog {
    movies: Vec<Movie>,
    offline: bool,
    fetches: AtomicUsize,
}

impl FixtureCatalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self {
            movies,
            offline: false,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn offline() -> Self {
        Self {
            movies: Vec::new(),
            offline: true,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<(), SearchError> {
        if self.offline {
            return Err(SearchError::Database("connection refused".to_string()));
        }
        Ok(())
    }

    fn matching(&self, query: &MovieQuery) -> Vec<Movie> {
        let mut rows: Vec<Movie> = self
            .movies
            .iter()
            .filter(|m| match query {
                MovieQuery::Title { text } => {
                    m.title.to_lowercase().contains(&text.to_lowercase())
                }
                MovieQuery::GenreYear { genre, years } => {
                    m.genre.as_deref() == Some(genre.as_str())
                        && m.release_year.is_some_and(|y| years.contains(y))
                }
            })
            .cloned()
            .collect();

        match query {
            MovieQuery::Title { .. } => {
                rows.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
            }
            MovieQuery::GenreYear { .. } => rows.sort_by(|a, b| {
                a.release_year
                    .cmp(&b.release_year)
                    .then_with(|| a.title.cmp(&b.title))
                    .then(a.id.cmp(&b.id))
            }),
        }
        rows
    }
}

#[async_trait::async_trait]
impl MovieCatalog for FixtureCatalog {
    async fn count(&self, query: &MovieQuery) -> Result<u64, SearchError> {
        self.check_online()?;
        Ok(self.matching(query).len() as u64)
    }

    async fn fetch(
        &self,
        query: &MovieQuery,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Movie>, SearchError> {
        self.check_online()?;
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .matching(query)
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect())
    }

    async fn genres(&self) -> Result<Vec<String>, SearchError> {
        self.check_online()?;
        let mut genres: Vec<String> = self.movies.iter().filter_map(|m| m.genre.clone()).collect();
        genres.sort();
        genres.dedup();
        Ok(genres)
    }

    async fn year_bounds(&self) -> Result<Option<YearBounds>, SearchError> {
        self.check_online()?;
        let years = self.movies.iter().filter_map(|m| m.release_year);
        let min = years.clone().min();
        let max = years.max();
        Ok(min.zip(max).map(|(min, max)| YearBounds { min, max }))
    }
}

/// A log store whose every operation fails.
pub struct UnreachableLogStore;

#[async_trait::async_trait]
impl SearchLogStore for UnreachableLogStore {
    async fn append(
        &self,
        _search: &SearchQuery,
        _results_count: u64,
    ) -> Result<SearchLogEntry, LogStoreError> {
        Err(LogStoreError::Unavailable(
            "server selection timed out".to_string(),
        ))
    }

    async fn recent(&self, _limit: usize) -> Result<Vec<SearchLogEntry>, LogStoreError> {
        Err(LogStoreError::Unavailable(
            "server selection timed out".to_string(),
        ))
    }

    async fn popular(&self, _limit: usize) -> Result<Vec<QueryFrequency>, LogStoreError> {
        Err(LogStoreError::Unavailable(
            "server selection timed out".to_string(),
        ))
    }
}
