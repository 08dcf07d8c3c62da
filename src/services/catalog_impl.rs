//! `SeaORM` implementation of the `MovieCatalog` trait.

use std::sync::Arc;

use crate::db::Catalog;
use crate::domain::YearBounds;
use crate::models::{Movie, MovieQuery};
use crate::services::catalog::{MovieCatalog, SearchError};

pub struct SeaOrmMovieCatalog {
    catalog: Arc<Catalog>,
}

impl SeaOrmMovieCatalog {
    #[must_use]
    pub const fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait::async_trait]
impl MovieCatalog for SeaOrmMovieCatalog {
    async fn count(&self, query: &MovieQuery) -> Result<u64, SearchError> {
        self.catalog
            .count_movies(query)
            .await
            .map_err(|e| SearchError::Database(e.to_string()))
    }

    async fn fetch(
        &self,
        query: &MovieQuery,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Movie>, SearchError> {
        self.catalog
            .fetch_movies(query, offset, limit)
            .await
            .map_err(|e| SearchError::Database(e.to_string()))
    }

    async fn genres(&self) -> Result<Vec<String>, SearchError> {
        self.catalog
            .genres()
            .await
            .map_err(|e| SearchError::Database(e.to_string()))
    }

    async fn year_bounds(&self) -> Result<Option<YearBounds>, SearchError> {
        self.catalog
            .year_bounds()
            .await
            .map_err(|e| SearchError::Database(e.to_string()))
    }
}
