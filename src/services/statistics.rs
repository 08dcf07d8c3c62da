use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::models::{QueryFrequency, SearchLogEntry};
use crate::search_log::{LogStoreError, SearchLogStore};

/// Groups entries by signature and ranks them by count desc, then most recent
/// use desc. Remaining ties fall back to the signature for a stable order.
pub fn rank_frequencies<'a>(
    entries: impl IntoIterator<Item = &'a SearchLogEntry>,
    limit: usize,
) -> Vec<QueryFrequency> {
    let mut buckets: HashMap<&str, QueryFrequency> = HashMap::new();

    for entry in entries {
        buckets
            .entry(entry.signature.as_str())
            .and_modify(|bucket| {
                bucket.count += 1;
                bucket.last_seen = bucket.last_seen.max(entry.executed_at);
            })
            .or_insert_with(|| QueryFrequency {
                signature: entry.signature.clone(),
                count: 1,
                last_seen: entry.executed_at,
            });
    }

    let mut ranked: Vec<QueryFrequency> = buckets.into_values().collect();
    ranked.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| b.last_seen.cmp(&a.last_seen))
            .then_with(|| a.signature.cmp(&b.signature))
    });
    ranked.truncate(limit);
    ranked
}

/// Read side of the search log.
pub struct StatisticsReporter {
    store: Arc<dyn SearchLogStore>,
    top_n: usize,
}

impl StatisticsReporter {
    #[must_use]
    pub fn new(store: Arc<dyn SearchLogStore>, top_n: usize) -> Self {
        Self { store, top_n }
    }

    #[must_use]
    pub const fn top_n(&self) -> usize {
        self.top_n
    }

    /// Most frequent searches; `limit` defaults to the configured top N.
    pub async fn popular_queries(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<QueryFrequency>, LogStoreError> {
        let limit = limit.unwrap_or(self.top_n);
        let ranked = self.store.popular(limit).await?;
        debug!(limit, returned = ranked.len(), "Popular queries fetched");
        Ok(ranked)
    }

    pub async fn recent_queries(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<SearchLogEntry>, LogStoreError> {
        let limit = limit.unwrap_or(self.top_n);
        self.store.recent(limit).await
    }
}
