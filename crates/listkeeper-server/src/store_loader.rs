//! Store initialization from server configuration

use anyhow::{Context, Result};
use listkeeper_store::{open_store, ListStore};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::config::{ServerConfig, StoreType};

/// Open the list store named in `config`
///
/// For SQLite, the database's parent directory is created first so a fresh
/// checkout can start with the default `./.data/sqlite.db`.
pub async fn init_store(config: &ServerConfig) -> Result<Arc<dyn ListStore>> {
    match &config.store {
        StoreType::Sqlite { path } => {
            ensure_parent_dir(path).await?;
            info!("Using SQLite store at {:?}", path);
        }
        StoreType::Postgres { .. } => info!("Using PostgreSQL store"),
        StoreType::Api { base_url } => info!("Using remote store at {}", base_url),
        StoreType::Memory => info!("Using in-memory store; lists will not survive a restart"),
    }

    open_store(&config.store.to_store_config())
        .await
        .context("Failed to open list store")
}

async fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {:?}", parent)),
        _ => Ok(()),
    }
}
