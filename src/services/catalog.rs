//! Read access to the movie catalog.
//!
//! The search and pagination layers only see [`MovieCatalog`], which keeps
//! query construction behind one seam and lets tests substitute a fixture
//! catalog.

use crate::domain::{YearBounds, YearRangeError};
use crate::models::{Movie, MovieQuery};
use thiserror::Error;

/// Errors from searching and paging through the catalog.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No more results")]
    EndOfResults,

    #[error("Already on the first page")]
    StartOfResults,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for SearchError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<YearRangeError> for SearchError {
    fn from(err: YearRangeError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Number of films matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Database`] on connection or query failures.
    async fn count(&self, query: &MovieQuery) -> Result<u64, SearchError>;

    /// One slice of the matching films in the query's stable order.
    async fn fetch(
        &self,
        query: &MovieQuery,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Movie>, SearchError>;

    /// Every genre name, alphabetically.
    async fn genres(&self) -> Result<Vec<String>, SearchError>;

    /// Release year bounds, `None` when no film has a release year.
    async fn year_bounds(&self) -> Result<Option<YearBounds>, SearchError>;
}
