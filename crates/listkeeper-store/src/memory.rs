//! In-memory list store
//!
//! Used by tests and for local development without a database. Nothing
//! survives a restart.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{error::StoreError, traits::ListStore, ListSnapshot, StoreResult};

/// In-memory list store
///
/// The write lock is held across the whole check-and-set, which makes each
/// `put` indivisible.
#[derive(Debug, Default)]
pub struct MemoryListStore {
    lists: RwLock<HashMap<String, ListSnapshot>>,
}

impl MemoryListStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lists currently stored
    pub async fn len(&self) -> usize {
        self.lists.read().await.len()
    }

    /// Whether no list has been created yet
    pub async fn is_empty(&self) -> bool {
        self.lists.read().await.is_empty()
    }
}

#[async_trait]
impl ListStore for MemoryListStore {
    async fn get(&self, list_id: &str) -> StoreResult<ListSnapshot> {
        self.lists
            .read()
            .await
            .get(list_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(list_id))
    }

    async fn put(
        &self,
        list_id: &str,
        items: Vec<Value>,
        expected_version: u64,
    ) -> StoreResult<ListSnapshot> {
        let mut lists = self.lists.write().await;

        let snapshot = match lists.get(list_id) {
            None if expected_version == 0 => ListSnapshot::new(items, 0),
            Some(current) if current.version == expected_version => {
                ListSnapshot::new(items, expected_version + 1)
            }
            _ => {
                debug!(list_id, expected_version, "stale write rejected");
                return Err(StoreError::conflict(list_id, expected_version));
            }
        };

        lists.insert(list_id.to_string(), snapshot.clone());
        debug!(list_id, version = snapshot.version, "list written");

        Ok(snapshot)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_creates_at_version_zero() {
        let store = MemoryListStore::new();
        assert!(store.is_empty().await);

        let snapshot = store.put("abc", vec![json!(1)], 0).await.unwrap();
        assert_eq!(snapshot.version, 0);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_conflict_does_not_mutate() {
        let store = MemoryListStore::new();
        store.put("abc", vec![json!("a")], 0).await.unwrap();
        store.put("abc", vec![json!("b")], 0).await.unwrap();

        let err = store.put("abc", vec![json!("c")], 0).await.unwrap_err();
        assert!(err.is_conflict());

        let current = store.get("abc").await.unwrap();
        assert_eq!(current, ListSnapshot::new(vec![json!("b")], 1));
    }

    #[tokio::test]
    async fn test_backend_name() {
        assert_eq!(MemoryListStore::new().backend_name(), "memory");
    }
}
