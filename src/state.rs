use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::Config;
use crate::db::Catalog;
use crate::domain::SessionId;
use crate::search_log::{MemorySearchLogStore, MongoSearchLogStore, SearchLogStore};
use crate::services::{QueryLogger, SeaOrmMovieCatalog, SearchService, StatisticsReporter};

/// Opens the configured search log store.
///
/// MongoDB clients connect lazily, so an unreachable server only surfaces on
/// the first write or read. A connection string that cannot be parsed falls
/// back to an in-memory store for this run.
pub async fn open_log_store(config: &Config) -> Arc<dyn SearchLogStore> {
    if !config.search_log.enabled {
        info!("Search logging to MongoDB disabled, keeping entries in memory");
        return Arc::new(MemorySearchLogStore::new());
    }

    match MongoSearchLogStore::connect(&config.search_log).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(error = %e, "Search log store unavailable, keeping entries in memory");
            Arc::new(MemorySearchLogStore::new())
        }
    }
}

/// Connection handles and services for one CLI session.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub catalog: Arc<Catalog>,

    pub log_store: Arc<dyn SearchLogStore>,

    pub search: Arc<SearchService>,

    pub statistics: Arc<StatisticsReporter>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let catalog = Catalog::with_pool_options(
            &config.catalog.database_url,
            config.catalog.max_connections,
            Duration::from_secs(config.catalog.connect_timeout_seconds),
        )
        .await?;
        let log_store = open_log_store(&config).await;

        Ok(Self::from_parts(config, catalog, log_store))
    }

    /// Wires services around existing connections.
    #[must_use]
    pub fn from_parts(
        config: Config,
        catalog: Catalog,
        log_store: Arc<dyn SearchLogStore>,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let session = SessionId::new();

        let search = Arc::new(SearchService::new(
            Arc::new(SeaOrmMovieCatalog::new(catalog.clone())),
            QueryLogger::new(log_store.clone()),
            session,
        ));

        let statistics = Arc::new(StatisticsReporter::new(
            log_store.clone(),
            config.statistics.top_n,
        ));

        info!(session = %session, "Session started");

        Self {
            config: Arc::new(config),
            catalog,
            log_store,
            search,
            statistics,
        }
    }
}
