use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::{SearchLogEntry, SearchQuery};
use crate::search_log::SearchLogStore;

/// Result of a best-effort log write.
#[derive(Debug, Clone)]
pub enum LogOutcome {
    Recorded(SearchLogEntry),
    Failed(String),
}

impl LogOutcome {
    #[must_use]
    pub const fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded(_))
    }
}

/// Writes one log entry per executed search. Failures are reported, never
/// propagated.
#[derive(Clone)]
pub struct QueryLogger {
    store: Arc<dyn SearchLogStore>,
}

impl QueryLogger {
    #[must_use]
    pub fn new(store: Arc<dyn SearchLogStore>) -> Self {
        Self { store }
    }

    pub async fn record(&self, search: &SearchQuery, results_count: u64) -> LogOutcome {
        match self.store.append(search, results_count).await {
            Ok(entry) => {
                debug!(id = %entry.id, signature = %entry.signature, "Recorded search");
                LogOutcome::Recorded(entry)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    query = %search.query,
                    "Failed to record search"
                );
                LogOutcome::Failed(e.to_string())
            }
        }
    }
}
