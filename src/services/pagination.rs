//! Offset-based paging over a catalog query.
//!
//! A [`PageCursor`] remembers the query, its total and the last page served.
//! Pages are fetched lazily with `OFFSET index * page_size`, so consecutive
//! pages neither repeat nor skip rows as long as the result set is stable.

use serde::Serialize;

use crate::models::{Movie, MovieQuery};
use crate::services::catalog::{MovieCatalog, SearchError};

/// One fixed-size slice of a result set.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// 1-based.
    pub number: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub movies: Vec<Movie>,
}

impl Page {
    /// Placeholder for a search with no matches.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            number: 1,
            total_pages: 0,
            total_items: 0,
            movies: Vec::new(),
        }
    }

    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.number >= self.total_pages
    }
}

#[derive(Debug, Clone)]
pub struct PageCursor {
    query: MovieQuery,
    total: u64,
    page_size: u64,
    /// Zero-based index of the page most recently served.
    current: Option<u64>,
}

impl PageCursor {
    #[must_use]
    pub fn new(query: MovieQuery, total: u64, page_size: u64) -> Self {
        Self {
            query,
            total,
            page_size: page_size.max(1),
            current: None,
        }
    }

    #[must_use]
    pub const fn query(&self) -> &MovieQuery {
        &self.query
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.page_size)
    }

    /// 1-based number of the page most recently served.
    #[must_use]
    pub fn current_page(&self) -> Option<u64> {
        self.current.map(|index| index + 1)
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.next_index() < self.total_pages()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current.is_some_and(|index| index > 0)
    }

    fn next_index(&self) -> u64 {
        self.current.map_or(0, |index| index + 1)
    }

    /// Serves the page after the current one, or the first page.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EndOfResults`] when no further page exists.
    pub async fn next_page(&mut self, catalog: &dyn MovieCatalog) -> Result<Page, SearchError> {
        let index = self.next_index();
        self.load(catalog, index).await
    }

    /// # Errors
    ///
    /// Returns [`SearchError::StartOfResults`] on the first page or before any
    /// page was served.
    pub async fn previous_page(&mut self, catalog: &dyn MovieCatalog) -> Result<Page, SearchError> {
        match self.current {
            Some(index) if index > 0 => self.load(catalog, index - 1).await,
            _ => Err(SearchError::StartOfResults),
        }
    }

    /// Jumps to a 1-based page number.
    pub async fn goto_page(
        &mut self,
        catalog: &dyn MovieCatalog,
        number: u64,
    ) -> Result<Page, SearchError> {
        if number == 0 {
            return Err(SearchError::Validation(
                "page numbers start at 1".to_string(),
            ));
        }
        self.load(catalog, number - 1).await
    }

    async fn load(&mut self, catalog: &dyn MovieCatalog, index: u64) -> Result<Page, SearchError> {
        if index >= self.total_pages() {
            return Err(SearchError::EndOfResults);
        }

        let offset = index * self.page_size;
        let movies = catalog.fetch(&self.query, offset, self.page_size).await?;

        // Rows removed since the count was taken.
        if movies.is_empty() {
            return Err(SearchError::EndOfResults);
        }

        self.current = Some(index);
        Ok(Page {
            number: index + 1,
            total_pages: self.total_pages(),
            total_items: self.total,
            movies,
        })
    }
}
