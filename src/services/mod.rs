pub mod catalog;
pub mod catalog_impl;
pub use catalog::{MovieCatalog, SearchError};
pub use catalog_impl::SeaOrmMovieCatalog;

pub mod pagination;
pub use pagination::{Page, PageCursor};

pub mod query_log;
pub use query_log::{LogOutcome, QueryLogger};

pub mod search;
pub use search::{SearchOutcome, SearchService};

pub mod statistics;
pub use statistics::{StatisticsReporter, rank_frequencies};

#[cfg(test)]
pub(crate) mod fixtures;
