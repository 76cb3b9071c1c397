//! SQLite list store
//!
//! Embedded single-file backend. The compare-and-swap is a single
//! statement, so SQLite's write lock makes each `put` indivisible.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::str::FromStr;
use tracing::{debug, info};

use crate::{
    error::StoreError,
    models::{db_version, encode_items},
    traits::ListStore,
    ListSnapshot, StoreResult,
};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS lists (
    list_id    TEXT PRIMARY KEY,
    json       TEXT NOT NULL,
    version    BIGINT NOT NULL DEFAULT 0,
    updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

/// Create the row at version 0, or advance it if it is still at version 0
const CREATE_OR_ADVANCE_FROM_ZERO: &str = r#"
INSERT INTO lists (list_id, json, version)
VALUES (?1, ?2, 0)
ON CONFLICT(list_id) DO UPDATE
    SET json = excluded.json,
        version = lists.version + 1,
        updated_at = CURRENT_TIMESTAMP
    WHERE lists.version = 0
RETURNING version
"#;

const ADVANCE: &str = r#"
UPDATE lists
SET json = ?1, version = version + 1, updated_at = CURRENT_TIMESTAMP
WHERE list_id = ?2 AND version = ?3
RETURNING version
"#;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// SQLite list store
pub struct SqliteListStore {
    pool: SqlitePool,
}

impl SqliteListStore {
    /// Open (creating if missing) the database at `location`
    ///
    /// `location` is a file path, a `sqlite://` URL, or `:memory:`.
    ///
    /// # Example
    /// ```no_run
    /// use listkeeper_store::SqliteListStore;
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let store = SqliteListStore::new("./.data/sqlite.db").await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn new(location: &str) -> StoreResult<Self> {
        Self::with_max_connections(location, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Open the database with an explicit pool size
    pub async fn with_max_connections(location: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = if location == ":memory:" || location == "sqlite::memory:" {
            // Every connection to :memory: is its own database; keep exactly one alive.
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
                .await?
        } else {
            let options = if location.starts_with("sqlite:") {
                SqliteConnectOptions::from_str(location)?
            } else {
                SqliteConnectOptions::new().filename(location)
            };

            SqlitePoolOptions::new()
                .max_connections(max_connections.max(1))
                .connect_with(
                    options
                        .create_if_missing(true)
                        .journal_mode(SqliteJournalMode::Wal),
                )
                .await?
        };

        info!(location, "SQLite list store opened");
        Self::with_pool(pool).await
    }

    /// Wrap an existing pool, creating the schema if needed
    pub async fn with_pool(pool: SqlitePool) -> StoreResult<Self> {
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl ListStore for SqliteListStore {
    async fn get(&self, list_id: &str) -> StoreResult<ListSnapshot> {
        let row = sqlx::query("SELECT json, version FROM lists WHERE list_id = ?1")
            .bind(list_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found(list_id))?;

        let json: String = row.try_get("json")?;
        let version: i64 = row.try_get("version")?;
        debug!(list_id, version, "list read");

        ListSnapshot::from_stored(&json, version)
    }

    async fn put(
        &self,
        list_id: &str,
        items: Vec<Value>,
        expected_version: u64,
    ) -> StoreResult<ListSnapshot> {
        let json = encode_items(&items)?;

        let query = if expected_version == 0 {
            sqlx::query(CREATE_OR_ADVANCE_FROM_ZERO)
                .bind(list_id)
                .bind(&json)
        } else {
            sqlx::query(ADVANCE)
                .bind(&json)
                .bind(list_id)
                .bind(db_version(list_id, expected_version)?)
        };

        let row = query.fetch_optional(&self.pool).await?;

        let Some(row) = row else {
            debug!(list_id, expected_version, "stale write rejected");
            return Err(StoreError::conflict(list_id, expected_version));
        };

        let version: i64 = row.try_get("version")?;
        debug!(list_id, version, "list written");

        ListSnapshot::from_stored_items(items, version)
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_database_keeps_state() {
        let store = SqliteListStore::new(":memory:").await.unwrap();

        store.put("abc", vec![json!({"name": "dishes"})], 0).await.unwrap();
        let snapshot = store.get("abc").await.unwrap();

        assert_eq!(snapshot.items, vec![json!({"name": "dishes"})]);
        assert_eq!(snapshot.version, 0);
    }

    #[tokio::test]
    async fn test_advance_requires_existing_row() {
        let store = SqliteListStore::new(":memory:").await.unwrap();

        let err = store.put("missing", vec![], 2).await.unwrap_err();
        assert!(err.is_conflict());
        assert!(store.get("missing").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_reopen_file_preserves_lists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lists.db");
        let path = path.to_str().unwrap();

        {
            let store = SqliteListStore::new(path).await.unwrap();
            store.put("abc", vec![json!("x")], 0).await.unwrap();
            store.put("abc", vec![json!("y")], 0).await.unwrap();
        }

        let store = SqliteListStore::new(path).await.unwrap();
        let snapshot = store.get("abc").await.unwrap();
        assert_eq!(snapshot, ListSnapshot::new(vec![json!("y")], 1));
    }
}
