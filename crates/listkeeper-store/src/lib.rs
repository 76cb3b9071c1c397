//! Versioned list store for listkeeper
//!
//! A list is an ordered sequence of opaque JSON items stored under a
//! client-chosen id, together with a version counter. Writes are
//! compare-and-swap on that counter: the caller names the version it last
//! saw, and the write is rejected with a conflict if anyone else got there
//! first.
//!
//! # Backends
//!
//! - **Memory**: process-local, for tests and development
//! - **SQLite** (`sqlite` feature, default): embedded single file
//! - **PostgreSQL** (`postgres` feature): client-server database
//! - **HTTP** (`api` feature): another listkeeper server
//!
//! All of them implement [`ListStore`] and pass the same [`conformance`]
//! suite.
//!
//! # Quick Start
//!
//! ```no_run
//! use listkeeper_store::{generate_list_id, open_store, StoreConfig, StoreError};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = open_store(&StoreConfig::sqlite("./.data/sqlite.db")).await?;
//!
//!     let list_id = generate_list_id();
//!     let created = store.put(&list_id, vec![], 0).await?;
//!
//!     match store.put(&list_id, vec![json!({"name": "dishes"})], created.version).await {
//!         Ok(snapshot) => println!("now at version {}", snapshot.version),
//!         Err(StoreError::VersionConflict { .. }) => println!("list changed, refresh"),
//!         Err(e) => return Err(e.into()),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │     listkeeper-server (REST API)       │
//! └──────────────┬─────────────────────────┘
//!                │ Arc<dyn ListStore>
//!                ↓
//! ┌────────────────────────────────────────┐
//! │   ListStore: get / put(expected)       │
//! └──────────────┬─────────────────────────┘
//!       ┌────────┼──────────┬──────────┐
//!       ↓        ↓          ↓          ↓
//!   Memory    SQLite    PostgreSQL    HTTP
//! ```

pub mod config;
pub mod conformance;
pub mod error;
pub mod loader;
pub mod memory;
pub mod models;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "api")]
pub mod http;

// Re-exports - Configuration
pub use config::{ConfigError, StoreBackend, StoreConfig};

// Re-exports - Loader
pub use loader::open_store;

// Re-exports - Error
pub use error::{StoreError, StoreResult};

// Re-exports - Stores
pub use memory::MemoryListStore;
pub use models::{generate_list_id, ListSnapshot};
pub use traits::ListStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteListStore;

#[cfg(feature = "postgres")]
pub use postgres::PostgresListStore;

#[cfg(feature = "api")]
pub use http::HttpListStore;
