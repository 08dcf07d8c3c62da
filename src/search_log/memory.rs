use std::sync::Mutex;

use uuid::Uuid;

use super::{LogStoreError, SearchLogStore};
use crate::models::{QueryFrequency, SearchLogEntry, SearchQuery};
use crate::services::statistics::rank_frequencies;

/// Process-local search log. Entries live as long as the store.
#[derive(Default)]
pub struct MemorySearchLogStore {
    entries: Mutex<Vec<SearchLogEntry>>,
}

impl MemorySearchLogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every entry in insertion order.
    pub fn entries(&self) -> Result<Vec<SearchLogEntry>, LogStoreError> {
        Ok(self.lock()?.clone())
    }

    pub fn len(&self) -> usize {
        self.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<SearchLogEntry>>, LogStoreError> {
        self.entries
            .lock()
            .map_err(|_| LogStoreError::Unavailable("in-memory log poisoned".to_string()))
    }
}

#[async_trait::async_trait]
impl SearchLogStore for MemorySearchLogStore {
    async fn append(
        &self,
        search: &SearchQuery,
        results_count: u64,
    ) -> Result<SearchLogEntry, LogStoreError> {
        let entry =
            SearchLogEntry::from_query(Uuid::new_v4().simple().to_string(), search, results_count);
        self.lock()?.push(entry.clone());
        Ok(entry)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<SearchLogEntry>, LogStoreError> {
        let mut entries: Vec<SearchLogEntry> = self.lock()?.iter().rev().cloned().collect();
        entries.sort_by(|a, b| b.executed_at.cmp(&a.executed_at));
        entries.truncate(limit);
        Ok(entries)
    }

    async fn popular(&self, limit: usize) -> Result<Vec<QueryFrequency>, LogStoreError> {
        let entries = self.lock()?;
        Ok(rank_frequencies(entries.iter(), limit))
    }
}
