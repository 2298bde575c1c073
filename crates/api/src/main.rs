use anyhow::{Context, Result};
use tracing::{info, warn};

use persistence::db::{resolve_connection, DatabaseConfig};
use persistence::metrics::record_pool_metrics;
use streamdash_api::{app, config, middleware};

/// How often pool gauges are refreshed.
const POOL_METRICS_INTERVAL_SECS: u64 = 15;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load().context("Failed to load configuration")?;

    middleware::logging::init_logging(&config.logging)
        .context("Failed to initialize logging")?;
    middleware::init_metrics().context("Failed to install metrics recorder")?;

    info!("Starting Streamdash admin API v{}", env!("CARGO_PKG_VERSION"));

    let (connection, pool) = resolve_connection(&DatabaseConfig::from(&config.database))
        .await
        .context("Failed to run database migrations")?;

    match &pool {
        Some(pool) => {
            info!("Document store connected");
            let pool = pool.clone();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(std::time::Duration::from_secs(
                    POOL_METRICS_INTERVAL_SECS,
                ));
                loop {
                    interval.tick().await;
                    record_pool_metrics(&pool);
                }
            });
        }
        None => warn!("Running without a document store; all reads serve fallback data"),
    }

    let app = app::create_app(config.clone(), connection);

    let addr = config.socket_addr().context("Invalid server address")?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
