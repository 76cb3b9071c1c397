//! Backend selection
//!
//! Builds the configured [`ListStore`] behind an `Arc<dyn ListStore>` so the
//! caller never depends on a concrete backend.

use std::sync::Arc;
use tracing::info;

use crate::config::{StoreBackend, StoreConfig};
use crate::error::{StoreError, StoreResult};
use crate::{ListStore, MemoryListStore};

/// Open the store described by `config`
///
/// # Example
///
/// ```rust,ignore
/// use listkeeper_store::{open_store, StoreConfig};
///
/// let store = open_store(&StoreConfig::sqlite("./.data/sqlite.db")).await?;
/// let snapshot = store.get("abc").await?;
/// ```
pub async fn open_store(config: &StoreConfig) -> StoreResult<Arc<dyn ListStore>> {
    config
        .validate()
        .map_err(|e| StoreError::Config(e.to_string()))?;

    let store: Arc<dyn ListStore> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryListStore::new()),
        StoreBackend::Sqlite => open_sqlite(config).await?,
        StoreBackend::Postgres => open_postgres(config).await?,
        StoreBackend::Api => open_api(config)?,
    };

    info!(backend = store.backend_name(), "List store ready");
    Ok(store)
}

#[cfg(feature = "sqlite")]
async fn open_sqlite(config: &StoreConfig) -> StoreResult<Arc<dyn ListStore>> {
    let path = required(&config.path, "path")?;
    let store = match config.max_connections {
        Some(max) => crate::SqliteListStore::with_max_connections(path, max).await?,
        None => crate::SqliteListStore::new(path).await?,
    };
    Ok(Arc::new(store))
}

#[cfg(not(feature = "sqlite"))]
async fn open_sqlite(_config: &StoreConfig) -> StoreResult<Arc<dyn ListStore>> {
    Err(disabled("sqlite"))
}

#[cfg(feature = "postgres")]
async fn open_postgres(config: &StoreConfig) -> StoreResult<Arc<dyn ListStore>> {
    let url = required(&config.database_url, "database_url")?;
    let store = match config.max_connections {
        Some(max) => crate::PostgresListStore::with_max_connections(url, max).await?,
        None => crate::PostgresListStore::new(url).await?,
    };
    Ok(Arc::new(store))
}

#[cfg(not(feature = "postgres"))]
async fn open_postgres(_config: &StoreConfig) -> StoreResult<Arc<dyn ListStore>> {
    Err(disabled("postgres"))
}

#[cfg(feature = "api")]
fn open_api(config: &StoreConfig) -> StoreResult<Arc<dyn ListStore>> {
    let url = required(&config.api_url, "api_url")?;
    Ok(Arc::new(crate::HttpListStore::new(url)?))
}

#[cfg(not(feature = "api"))]
fn open_api(_config: &StoreConfig) -> StoreResult<Arc<dyn ListStore>> {
    Err(disabled("api"))
}

#[allow(dead_code)]
fn required<'a>(value: &'a Option<String>, field: &str) -> StoreResult<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| StoreError::Config(format!("{} is required", field)))
}

#[allow(dead_code)]
fn disabled(feature: &str) -> StoreError {
    StoreError::Config(format!(
        "{} backend is not compiled in; enable the '{}' feature",
        feature, feature
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_memory_store() {
        let store = open_store(&StoreConfig::memory()).await.unwrap();
        assert_eq!(store.backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_open_rejects_invalid_config() {
        let config = StoreConfig {
            backend: StoreBackend::Postgres,
            ..Default::default()
        };
        let err = open_store(&config).await.err().unwrap();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn test_open_sqlite_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lists.db");
        let config = StoreConfig::sqlite(path.to_string_lossy()).with_max_connections(2);

        let store = open_store(&config).await.unwrap();
        assert_eq!(store.backend_name(), "sqlite");
        assert!(path.exists());
    }
}
