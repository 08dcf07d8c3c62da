use crate::domain::YearBounds;
use crate::models::{Movie, MovieQuery};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

/// Read-only handle on the relational movie catalog.
#[derive(Clone)]
pub struct Catalog {
    pub conn: DatabaseConnection,
}

impl Catalog {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 1, Duration::from_secs(10)).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(1)
            .connect_timeout(connect_timeout)
            .acquire_timeout(connect_timeout)
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        info!(
            backend = ?conn.get_database_backend(),
            max_connections,
            "Catalog connected"
        );

        Ok(Self { conn })
    }

    /// Creates the catalog schema. Local SQLite files are created if absent.
    pub async fn bootstrap(db_url: &str) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if let Some(path_str) = sqlite_file_path(db_url) {
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let catalog = Self::new(db_url).await?;
        migrator::Migrator::up(&catalog.conn, None).await?;
        info!("Catalog schema applied");

        Ok(catalog)
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    pub async fn count_movies(&self, query: &MovieQuery) -> Result<u64> {
        self.movie_repo().count(query).await
    }

    pub async fn fetch_movies(
        &self,
        query: &MovieQuery,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Movie>> {
        self.movie_repo().fetch(query, offset, limit).await
    }

    pub async fn genres(&self) -> Result<Vec<String>> {
        self.movie_repo().genres().await
    }

    pub async fn year_bounds(&self) -> Result<Option<YearBounds>> {
        self.movie_repo().year_bounds().await
    }
}

/// File path of a `sqlite:` URL, or `None` for other backends and in-memory
/// databases.
fn sqlite_file_path(db_url: &str) -> Option<&str> {
    let rest = db_url.strip_prefix("sqlite:")?;
    let rest = rest.trim_start_matches("//");
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    Some(path)
}
