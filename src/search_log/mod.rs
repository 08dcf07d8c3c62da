//! Document store for executed searches.
//!
//! The store is append-only: entries are written once by the query logger and
//! read back for statistics. [`MongoSearchLogStore`] is the production
//! backend, [`MemorySearchLogStore`] backs tests and deployments with
//! search logging disabled.

pub mod memory;
pub mod mongo;

pub use memory::MemorySearchLogStore;
pub use mongo::MongoSearchLogStore;

use crate::models::{QueryFrequency, SearchLogEntry, SearchQuery};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogStoreError {
    #[error("Search log store unavailable: {0}")]
    Unavailable(String),

    #[error("Search log write rejected: {0}")]
    Write(String),

    #[error("Malformed search log document: {0}")]
    Decode(String),
}

impl From<mongodb::error::Error> for LogStoreError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match *err.kind {
            ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) | ErrorKind::DnsResolve { .. } => {
                Self::Unavailable(err.to_string())
            }
            ErrorKind::BsonDeserialization(_) => Self::Decode(err.to_string()),
            _ => Self::Write(err.to_string()),
        }
    }
}

/// Append-only storage of search log entries.
#[async_trait::async_trait]
pub trait SearchLogStore: Send + Sync {
    /// Persists one executed search and returns the stored entry with its
    /// generated identifier.
    async fn append(
        &self,
        search: &SearchQuery,
        results_count: u64,
    ) -> Result<SearchLogEntry, LogStoreError>;

    /// Most recent entries, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<SearchLogEntry>, LogStoreError>;

    /// Signatures ranked by frequency desc, then most recent use desc.
    async fn popular(&self, limit: usize) -> Result<Vec<QueryFrequency>, LogStoreError>;
}
