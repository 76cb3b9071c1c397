//! Data models for the list store

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{StoreError, StoreResult};

/// The state of one list: its items and the version they were written at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListSnapshot {
    /// Opaque items, in order
    pub items: Vec<Value>,
    /// Starts at 0 on creation and advances by one on every write
    pub version: u64,
}

impl ListSnapshot {
    /// Create a new snapshot
    pub fn new(items: Vec<Value>, version: u64) -> Self {
        Self { items, version }
    }

    /// Decode a snapshot from its stored form (JSON text + SQL integer)
    pub(crate) fn from_stored(json: &str, version: i64) -> StoreResult<Self> {
        let items: Vec<Value> = serde_json::from_str(json)?;
        Self::from_stored_items(items, version)
    }

    /// Pair already-decoded items with a version read back from SQL
    pub(crate) fn from_stored_items(items: Vec<Value>, version: i64) -> StoreResult<Self> {
        let version = u64::try_from(version).map_err(|_| {
            StoreError::StorageUnavailable(format!("stored version {} is negative", version))
        })?;
        Ok(Self { items, version })
    }
}

/// Mint a fresh random (UUID v4) list id
///
/// Ids are chosen by clients. Anyone who knows an id can read and write
/// the list, so fresh ids should be unguessable.
pub fn generate_list_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Encode items for storage
pub(crate) fn encode_items(items: &[Value]) -> StoreResult<String> {
    Ok(serde_json::to_string(items)?)
}

/// Convert a caller's expected version to the SQL column type
///
/// A version beyond `i64::MAX` can never have been stored, so it is
/// reported as stale rather than as a storage failure.
#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub(crate) fn db_version(list_id: &str, expected: u64) -> StoreResult<i64> {
    i64::try_from(expected).map_err(|_| StoreError::conflict(list_id, expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_stored() {
        let snapshot = ListSnapshot::from_stored(r#"[{"name":"dishes"}]"#, 4).unwrap();
        assert_eq!(snapshot.items, vec![json!({"name": "dishes"})]);
        assert_eq!(snapshot.version, 4);
    }

    #[test]
    fn test_from_stored_rejects_negative_version() {
        let err = ListSnapshot::from_stored("[]", -1).unwrap_err();
        assert!(matches!(err, StoreError::StorageUnavailable(_)));
    }

    #[test]
    fn test_from_stored_rejects_non_array() {
        let err = ListSnapshot::from_stored(r#"{"name":"dishes"}"#, 0).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn test_encode_items_preserves_order() {
        let items = vec![json!("b"), json!("a"), json!(3)];
        assert_eq!(encode_items(&items).unwrap(), r#"["b","a",3]"#);
    }

    #[test]
    fn test_generated_ids_are_unique_uuids() {
        let a = generate_list_id();
        let b = generate_list_id();
        assert_ne!(a, b);
        assert!(uuid::Uuid::parse_str(&a).is_ok());
    }
}
