//! Conformance tests for SqliteListStore

#![cfg(feature = "sqlite")]

use listkeeper_store::{conformance, ListStore, SqliteListStore};
use std::sync::Arc;
use tempfile::TempDir;

/// Open a store backed by a fresh database file
async fn file_store(max_connections: u32) -> (TempDir, Arc<dyn ListStore>) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sqlite.db");
    let store = SqliteListStore::with_max_connections(path.to_str().unwrap(), max_connections)
        .await
        .expect("Failed to open SQLite store");
    (dir, Arc::new(store))
}

#[tokio::test]
async fn test_sqlite_file_store_conformance() {
    let (_dir, store) = file_store(4).await;
    conformance::run_all(store).await;
}

#[tokio::test]
async fn test_sqlite_memory_store_conformance() {
    let store = SqliteListStore::new(":memory:").await.unwrap();
    conformance::run_all(Arc::new(store)).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sqlite_concurrent_writers_across_connections() {
    let (_dir, store) = file_store(8).await;
    conformance::concurrent_writers_single_winner(store, 16).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sqlite_concurrent_creators_across_connections() {
    let (_dir, store) = file_store(8).await;
    conformance::concurrent_creators_on_fresh_id(store, 16).await;
}

#[tokio::test]
async fn test_sqlite_url_location_creates_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fresh.db");
    let url = format!("sqlite://{}", path.display());

    let store = SqliteListStore::new(&url).await.unwrap();
    assert!(path.exists());
    conformance::chore_scenario(&store).await;
}

#[tokio::test]
async fn test_sqlite_url_location() {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("url.db").display());

    let store = SqliteListStore::new(&url).await.unwrap();
    conformance::chore_scenario(&store).await;
}
