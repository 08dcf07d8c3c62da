use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{self, Document, doc, oid::ObjectId};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{LogStoreError, SearchLogStore};
use crate::config::SearchLogConfig;
use crate::domain::{SearchKind, SessionId};
use crate::models::search::SearchParams;
use crate::models::{QueryFrequency, SearchLogEntry, SearchQuery};

/// Shape of one search log in the collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SearchLogDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    timestamp: bson::DateTime,
    search_type: SearchKind,
    params: SearchParams,
    results_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    session_id: Option<String>,
    signature: String,
}

impl SearchLogDocument {
    fn from_query(search: &SearchQuery, results_count: u64) -> Self {
        Self {
            id: None,
            timestamp: to_bson_datetime(search.executed_at),
            search_type: search.query.kind(),
            params: search.query.params(),
            results_count: i64::try_from(results_count).unwrap_or(i64::MAX),
            session_id: Some(search.session.to_string()),
            signature: search.query.signature(),
        }
    }

    fn into_entry(self) -> Result<SearchLogEntry, LogStoreError> {
        let id = self
            .id
            .map(|oid| oid.to_hex())
            .ok_or_else(|| LogStoreError::Decode("document without _id".to_string()))?;

        Ok(SearchLogEntry {
            id,
            kind: self.search_type,
            params: self.params,
            signature: self.signature,
            results_count: u64::try_from(self.results_count).unwrap_or(0),
            session: self
                .session_id
                .and_then(|s| s.parse::<uuid::Uuid>().ok())
                .map(SessionId::from),
            executed_at: from_bson_datetime(self.timestamp)?,
        })
    }
}

/// One `$group` output row of the popularity pipeline.
#[derive(Debug, Deserialize)]
struct FrequencyBucket {
    #[serde(rename = "_id")]
    signature: String,
    count: i64,
    last_seen: bson::DateTime,
}

fn to_bson_datetime(at: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(at.timestamp_millis())
}

fn from_bson_datetime(at: bson::DateTime) -> Result<DateTime<Utc>, LogStoreError> {
    DateTime::<Utc>::from_timestamp_millis(at.timestamp_millis())
        .ok_or_else(|| LogStoreError::Decode(format!("timestamp out of range: {at}")))
}

/// MongoDB reads a zero limit as "no limit" in `find` and rejects it in
/// `$limit`, so a zero limit never reaches the server.
fn server_limit(limit: usize) -> Option<i64> {
    (limit > 0).then(|| i64::try_from(limit).unwrap_or(i64::MAX))
}

/// Group by signature, rank by count then most recent use.
fn popular_pipeline(limit: i64) -> Vec<Document> {
    vec![
        doc! {
            "$group": {
                "_id": "$signature",
                "count": { "$sum": 1 },
                "last_seen": { "$max": "$timestamp" },
            }
        },
        doc! { "$sort": { "count": -1, "last_seen": -1, "_id": 1 } },
        doc! { "$limit": limit },
    ]
}

/// MongoDB-backed search log.
///
/// Writes and reads may use different connection strings so that statistics
/// can run with read-only credentials.
pub struct MongoSearchLogStore {
    writer: Collection<SearchLogDocument>,
    reader: Collection<SearchLogDocument>,
}

impl MongoSearchLogStore {
    /// Builds the clients. No server round trip happens until the first
    /// operation, so an unreachable server surfaces per operation.
    pub async fn connect(config: &SearchLogConfig) -> Result<Self, LogStoreError> {
        let timeout = Duration::from_secs(config.server_selection_timeout_seconds);

        let write_client = Self::client(&config.url, timeout).await?;
        let read_client = match config.read_url.as_deref() {
            Some(url) if url != config.url => Self::client(url, timeout).await?,
            _ => write_client.clone(),
        };

        let writer = write_client
            .database(&config.database)
            .collection::<SearchLogDocument>(&config.collection);
        let reader = read_client
            .database(&config.database)
            .collection::<SearchLogDocument>(&config.collection);

        info!(
            database = %config.database,
            collection = %config.collection,
            "Search log store configured"
        );

        Ok(Self {
            writer,
            reader,
        })
    }

    async fn client(url: &str, timeout: Duration) -> Result<Client, LogStoreError> {
        let mut options = ClientOptions::parse(url)
            .await
            .map_err(|e| LogStoreError::Unavailable(e.to_string()))?;
        options.server_selection_timeout = Some(timeout);
        options.app_name = Some("reelsearch".to_string());
        Client::with_options(options).map_err(|e| LogStoreError::Unavailable(e.to_string()))
    }
}

#[async_trait::async_trait]
impl SearchLogStore for MongoSearchLogStore {
    async fn append(
        &self,
        search: &SearchQuery,
        results_count: u64,
    ) -> Result<SearchLogEntry, LogStoreError> {
        let document = SearchLogDocument::from_query(search, results_count);
        let result = self.writer.insert_one(&document).await?;

        let id = result
            .inserted_id
            .as_object_id()
            .map_or_else(|| result.inserted_id.to_string(), |oid| oid.to_hex());
        debug!(id = %id, signature = %document.signature, "Search logged");

        Ok(SearchLogEntry::from_query(id, search, results_count))
    }

    async fn recent(&self, limit: usize) -> Result<Vec<SearchLogEntry>, LogStoreError> {
        let Some(limit) = server_limit(limit) else {
            return Ok(Vec::new());
        };

        let cursor = self
            .reader
            .find(doc! {})
            .sort(doc! { "timestamp": -1 })
            .limit(limit)
            .await?;
        let documents: Vec<SearchLogDocument> = cursor.try_collect().await?;

        documents
            .into_iter()
            .map(SearchLogDocument::into_entry)
            .collect()
    }

    async fn popular(&self, limit: usize) -> Result<Vec<QueryFrequency>, LogStoreError> {
        let Some(limit) = server_limit(limit) else {
            return Ok(Vec::new());
        };

        let mut cursor = self.reader.aggregate(popular_pipeline(limit)).await?;

        let mut ranked = Vec::new();
        while let Some(row) = cursor.try_next().await? {
            let bucket: FrequencyBucket =
                bson::from_document(row).map_err(|e| LogStoreError::Decode(e.to_string()))?;
            ranked.push(QueryFrequency {
                signature: bucket.signature,
                count: u64::try_from(bucket.count).unwrap_or(0),
                last_seen: from_bson_datetime(bucket.last_seen)?,
            });
        }

        Ok(ranked)
    }
}
