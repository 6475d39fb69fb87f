//! Gametracker store service
//!
//! HTTP persistence backend for the game collection: create/list/update/
//! delete over a single SQLite-backed document collection, plus the legacy
//! user record endpoints.

mod routes;

use anyhow::Result;
use gametracker_config::TrackerConfig;
use gametracker_store::EntryStore;
use routes::{AppState, build_router};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = TrackerConfig::load_default()?;

    info!("Opening entry store at {}", config.server.database.display());
    let store = EntryStore::open(&config.server.database)?;

    let app = build_router(AppState::new(store));

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Store service listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
