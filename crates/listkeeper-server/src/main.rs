//! listkeeper HTTP server
//!
//! Serves versioned lists over a small REST API.

use anyhow::Result;
use listkeeper_server::{api, config::ServerConfig, store_loader, telemetry};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Initialize tracing
    telemetry::init_tracing(&config)?;
    info!("Loaded configuration: {:?}", config);

    // Initialize list store
    let store = store_loader::init_store(&config).await?;
    info!("List store initialized ({})", store.backend_name());

    let app = api::create_router(store);

    // Start server
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Your app is listening on http://{}", listener.local_addr()?);
    info!("  Health check: http://{}/health", addr);
    info!("  Lists: http://{}/api/list/:listId", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
