//! The list store contract
//!
//! ```no_run
//! use listkeeper_store::{ListStore, MemoryListStore};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let store = MemoryListStore::new();
//!
//! // Create: expected version 0 on a fresh id
//! let created = store.put("abc", vec![], 0).await?;
//! assert_eq!(created.version, 0);
//!
//! // Update: echo the version last read
//! let updated = store.put("abc", vec![json!({"name": "dishes"})], 0).await?;
//! assert_eq!(updated.version, 1);
//!
//! // A second writer still holding version 0 is rejected
//! let stale = store.put("abc", vec![json!({"name": "laundry"})], 0).await;
//! assert!(stale.unwrap_err().is_conflict());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde_json::Value;

use crate::{ListSnapshot, StoreResult};

/// Durable storage from list id to `(items, version)` with compare-and-swap
/// writes
///
/// # Contract
///
/// - [`get`](ListStore::get) on an id never written fails with
///   [`NotFound`](crate::StoreError::NotFound); an empty list is a success.
/// - [`put`](ListStore::put) replaces the items wholesale, atomically with
///   respect to every other `put` on the same id:
///   - absent and `expected_version == 0`: create at version 0
///   - present at `expected_version`: replace and advance the version by one
///   - anything else: no change, [`VersionConflict`](crate::StoreError::VersionConflict)
///
/// Conflicts are never retried by the store. Implementations must rely on
/// the backend's own atomic primitive for the check-and-set.
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Load the current items and version of a list
    async fn get(&self, list_id: &str) -> StoreResult<ListSnapshot>;

    /// Replace the items of a list if its version is still `expected_version`
    ///
    /// Returns the snapshot that is now current.
    async fn put(
        &self,
        list_id: &str,
        items: Vec<Value>,
        expected_version: u64,
    ) -> StoreResult<ListSnapshot>;

    /// Short backend name for logs and health output
    fn backend_name(&self) -> &'static str;
}
