//! Error types for the list store

use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations
///
/// `NotFound` and `VersionConflict` are ordinary outcomes of the read and
/// compare-and-swap contract. Everything else means the backend could not
/// answer, and a write that failed this way must not be assumed applied.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No list has ever been written under this id
    #[error("List not found: {list_id}")]
    NotFound { list_id: String },

    /// The caller's expected version no longer matches the stored one
    #[error("Version conflict on list {list_id}: expected version {expected} is stale")]
    VersionConflict { list_id: String, expected: u64 },

    /// Transport or driver failure
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Stored or received JSON could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid backend configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error (when a SQL backend is enabled)
    #[cfg(any(feature = "sqlite", feature = "postgres"))]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Whether this is a stale-version rejection
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::VersionConflict { .. })
    }

    /// Whether the list does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub(crate) fn not_found(list_id: &str) -> Self {
        StoreError::NotFound {
            list_id: list_id.to_string(),
        }
    }

    pub(crate) fn conflict(list_id: &str, expected: u64) -> Self {
        StoreError::VersionConflict {
            list_id: list_id.to_string(),
            expected,
        }
    }
}
