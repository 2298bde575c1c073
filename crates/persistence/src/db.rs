//! Database connection pool management and the startup connectivity probe.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::connection::ConnectionState;
use crate::store::PgDocumentStore;

/// Database configuration.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Connection URL. Empty means no document store is configured.
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    /// Apply pending migrations after a successful probe.
    pub run_migrations: bool,
}

/// Creates a PostgreSQL connection pool with the given configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await
}

/// Connectivity probe: returns a pool only if the database answers `SELECT 1`.
///
/// Every failure is logged and reported as `None`.
pub async fn probe(config: &DatabaseConfig) -> Option<PgPool> {
    if config.url.trim().is_empty() {
        info!("No database URL configured; serving fallback data");
        return None;
    }

    let pool = match create_pool(config).await {
        Ok(pool) => pool,
        Err(e) => {
            warn!(error = %e, "Database connection failed; serving fallback data");
            return None;
        }
    };

    match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => Some(pool),
        Err(e) => {
            warn!(error = %e, "Database probe query failed; serving fallback data");
            None
        }
    }
}

/// Resolves the process-wide `ConnectionState`.
///
/// Migrations run only after a successful probe; a failing migration is an
/// error rather than a silent fallback.
pub async fn resolve_connection(
    config: &DatabaseConfig,
) -> Result<(ConnectionState, Option<PgPool>), sqlx::migrate::MigrateError> {
    let Some(pool) = probe(config).await else {
        return Ok((ConnectionState::Unconfigured, None));
    };

    if config.run_migrations {
        info!("Running database migrations...");
        sqlx::migrate!("./src/migrations").run(&pool).await?;
        info!("Migrations completed");
    }

    let store = Arc::new(PgDocumentStore::new(pool.clone()));
    Ok((ConnectionState::configured(store), Some(pool)))
}
