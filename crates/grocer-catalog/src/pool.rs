//! # Catalog Database Pool
//!
//! Connection pool creation and configuration for the SQLite catalog.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Connection Pool                            │
//! │                                                                         │
//! │  checkout / seed startup                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogConfig::new(path) ← Configure pool settings                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Catalog::open(config).await ← Create pool + run migrations            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐                │                           │
//! │  │  │Conn1│ │Conn2│ │Conn3│ ...            │  (max_connections)        │
//! │  │  └─────┘ └─────┘ └─────┘                │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  catalog.beers() / breads() / vegetables()                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! WAL mode is enabled so price lookups never wait behind catalog edits.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{CatalogError, CatalogResult};
use crate::migrations;
use crate::repository::{BeerRepository, BreadRepository, VegetableRepository};

const IN_MEMORY: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Catalog database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = CatalogConfig::new("/path/to/catalog.db")
///     .max_connections(5)
///     .create_if_missing(false);
/// ```
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on open.
    /// Default: true
    pub run_migrations: bool,

    /// Whether a missing database file is created.
    /// Default: true. The checkout turns this off so a mistyped path is an
    /// error rather than an empty catalog.
    pub create_if_missing: bool,
}

impl CatalogConfig {
    /// Creates a configuration for the database file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CatalogConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
            create_if_missing: true,
        }
    }

    /// Creates an in-memory configuration (for tests).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let catalog = Catalog::open(CatalogConfig::in_memory()).await?;
    /// ```
    pub fn in_memory() -> Self {
        CatalogConfig {
            database_path: PathBuf::from(IN_MEMORY),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
            create_if_missing: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on open.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Sets whether a missing database file is created.
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY)
    }

    fn connect_options(&self) -> CatalogResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| CatalogError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(self.create_if_missing)
        };

        Ok(options
            // Readers don't block writers, writers don't block readers
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true))
    }
}

// =============================================================================
// Catalog Handle
// =============================================================================

/// Handle to the catalog database, providing repository access.
///
/// Cloning is cheap; clones share the pool.
///
/// ## Example
/// ```rust,ignore
/// let catalog = Catalog::open(CatalogConfig::new("./catalog.db")).await?;
/// let beers = catalog.beers().list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    pool: SqlitePool,
}

impl Catalog {
    /// Opens the catalog database.
    ///
    /// ## What This Does
    /// 1. Creates the database file and its directory if allowed and missing
    /// 2. Enables WAL mode, NORMAL synchronous and foreign keys
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    ///
    /// ## Returns
    /// * `Ok(Catalog)` - Ready-to-use catalog handle
    /// * `Err(CatalogError::ConnectionFailed)` - File missing or unreadable
    /// * `Err(CatalogError::MigrationFailed)` - Schema could not be applied
    pub async fn open(config: CatalogConfig) -> CatalogResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening catalog database"
        );

        if config.create_if_missing && !config.is_in_memory() {
            if let Some(parent) = config.database_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| CatalogError::ConnectionFailed(e.to_string()))?;
                }
            }
        }

        let connect_options = config.connect_options()?;
        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| CatalogError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Catalog pool created"
        );

        let catalog = Catalog { pool };
        if config.run_migrations {
            catalog.run_migrations().await?;
        }
        Ok(catalog)
    }

    /// Applies pending schema migrations. Idempotent.
    pub async fn run_migrations(&self) -> CatalogResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// The connection pool, for queries the repositories do not cover.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn beers(&self) -> BeerRepository {
        BeerRepository::new(self.pool.clone())
    }

    pub fn breads(&self) -> BreadRepository {
        BreadRepository::new(self.pool.clone())
    }

    pub fn vegetables(&self) -> VegetableRepository {
        VegetableRepository::new(self.pool.clone())
    }

    /// Closes the pool. Later repository calls fail with `ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing catalog database");
        self.pool.close().await;
    }

    /// ## Returns
    /// * `true` - Database is responsive
    /// * `false` - Database is unavailable
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_db(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("grocer-pool-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[tokio::test]
    async fn test_in_memory_catalog() {
        let catalog = Catalog::open(CatalogConfig::in_memory()).await.unwrap();
        assert!(catalog.health_check().await);
        assert_eq!(catalog.beers().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = CatalogConfig::new("/tmp/catalog.db")
            .max_connections(10)
            .min_connections(2)
            .create_if_missing(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(!config.create_if_missing);
        assert!(!config.is_in_memory());
        assert!(CatalogConfig::in_memory().is_in_memory());
    }

    #[tokio::test]
    async fn test_file_catalog_is_created_with_its_directory() {
        let path = temp_db("catalog.db");
        let catalog = Catalog::open(CatalogConfig::new(&path)).await.unwrap();
        assert!(path.exists());

        catalog.close().await;
        assert!(!catalog.health_check().await);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_missing_file_without_create_fails() {
        let path = temp_db("absent.db");
        let err = Catalog::open(CatalogConfig::new(&path).create_if_missing(false))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::ConnectionFailed(_)));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_reopen_keeps_data() {
        let path = temp_db("catalog.db");
        {
            let catalog = Catalog::open(CatalogConfig::new(&path)).await.unwrap();
            catalog
                .vegetables()
                .insert(crate::VegetableDraft::new(
                    "Carrot",
                    grocer_core::Money::from_cents(100),
                ))
                .await
                .unwrap();
            catalog.close().await;
        }

        let catalog = Catalog::open(CatalogConfig::new(&path).create_if_missing(false))
            .await
            .unwrap();
        assert_eq!(catalog.vegetables().count().await.unwrap(), 1);
        catalog.close().await;
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
