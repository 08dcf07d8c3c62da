//! Movie search: validation, counting, logging and the first page.

use std::sync::Arc;

use tracing::info;

use crate::constants::paging::PAGE_SIZE;
use crate::domain::{SessionId, YearBounds, YearRange};
use crate::models::{MovieQuery, SearchQuery};
use crate::services::catalog::{MovieCatalog, SearchError};
use crate::services::pagination::{Page, PageCursor};
use crate::services::query_log::{LogOutcome, QueryLogger};

/// An executed search. `first_page` is `None` when nothing matched.
#[derive(Debug)]
pub struct SearchOutcome {
    pub cursor: PageCursor,
    pub first_page: Option<Page>,
    pub log: LogOutcome,
}

impl SearchOutcome {
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.cursor.total()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cursor.total() == 0
    }
}

pub struct SearchService {
    catalog: Arc<dyn MovieCatalog>,
    logger: QueryLogger,
    session: SessionId,
    page_size: u64,
}

impl SearchService {
    #[must_use]
    pub fn new(catalog: Arc<dyn MovieCatalog>, logger: QueryLogger, session: SessionId) -> Self {
        Self {
            catalog,
            logger,
            session,
            page_size: PAGE_SIZE,
        }
    }

    #[must_use]
    pub const fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size;
        self
    }

    /// The catalog pages of an outcome's cursor are fetched from.
    #[must_use]
    pub fn catalog(&self) -> &dyn MovieCatalog {
        self.catalog.as_ref()
    }

    #[must_use]
    pub const fn session(&self) -> SessionId {
        self.session
    }

    pub async fn genres(&self) -> Result<Vec<String>, SearchError> {
        self.catalog.genres().await
    }

    pub async fn year_bounds(&self) -> Result<Option<YearBounds>, SearchError> {
        self.catalog.year_bounds().await
    }

    /// Substring search on titles.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Validation`] for blank input
    /// - [`SearchError::Database`] when the catalog cannot be queried
    pub async fn search_title(&self, text: &str) -> Result<SearchOutcome, SearchError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SearchError::Validation(
                "title search text cannot be empty".to_string(),
            ));
        }

        self.execute(MovieQuery::Title {
            text: text.to_string(),
        })
        .await
    }

    /// Films of one genre released within `from..=to`.
    ///
    /// The genre is matched case-insensitively against the catalog and both
    /// years must lie within the catalog's release-year bounds.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Validation`] for an unknown genre or an inverted or
    ///   out-of-bounds range
    /// - [`SearchError::Database`] when the catalog cannot be queried
    pub async fn search_genre_year(
        &self,
        genre: &str,
        from: i32,
        to: i32,
    ) -> Result<SearchOutcome, SearchError> {
        let genre = self.resolve_genre(genre).await?;
        let bounds = self.catalog.year_bounds().await?.ok_or_else(|| {
            SearchError::Validation("the catalog has no release years".to_string())
        })?;
        let years = YearRange::within(from, to, bounds)?;

        self.execute(MovieQuery::GenreYear { genre, years }).await
    }

    async fn resolve_genre(&self, genre: &str) -> Result<String, SearchError> {
        let genre = genre.trim();
        if genre.is_empty() {
            return Err(SearchError::Validation("genre cannot be empty".to_string()));
        }

        self.catalog
            .genres()
            .await?
            .into_iter()
            .find(|known| known.eq_ignore_ascii_case(genre))
            .ok_or_else(|| SearchError::Validation(format!("unknown genre '{genre}'")))
    }

    /// Counts, logs exactly once, then serves the first page.
    async fn execute(&self, query: MovieQuery) -> Result<SearchOutcome, SearchError> {
        let search = SearchQuery::new(query, self.session);
        let total = self.catalog.count(&search.query).await?;

        let log = self.logger.record(&search, total).await;

        let mut cursor = PageCursor::new(search.query, total, self.page_size);
        let first_page = match cursor.next_page(self.catalog.as_ref()).await {
            Ok(page) => Some(page),
            Err(SearchError::EndOfResults) => None,
            Err(e) => return Err(e),
        };

        info!(
            query = %cursor.query(),
            total,
            pages = cursor.total_pages(),
            logged = log.is_recorded(),
            "Search executed"
        );

        Ok(SearchOutcome {
            cursor,
            first_page,
            log,
        })
    }
}
