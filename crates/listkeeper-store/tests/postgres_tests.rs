//! Conformance tests for PostgresListStore
//!
//! These tests require a PostgreSQL database to be running.
//! Set the DATABASE_URL environment variable to run these tests:
//!
//! ```bash
//! export DATABASE_URL="postgresql://localhost/listkeeper_test"
//! cargo test --package listkeeper-store --features postgres -- --ignored
//! ```

#[cfg(feature = "postgres")]
mod postgres_tests {
    use listkeeper_store::{conformance, ListStore, PostgresListStore};
    use std::sync::Arc;

    /// Get database URL from environment or use default test database
    fn get_database_url() -> String {
        std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgresql://localhost/listkeeper_test".to_string())
    }

    async fn setup_store() -> Arc<dyn ListStore> {
        let store = PostgresListStore::with_max_connections(&get_database_url(), 16)
            .await
            .expect("Failed to connect to test database. Make sure PostgreSQL is running and DATABASE_URL is set correctly.");
        Arc::new(store)
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_postgres_store_conformance() {
        conformance::run_all(setup_store().await).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    #[ignore] // Requires database setup
    async fn test_postgres_many_concurrent_writers() {
        conformance::concurrent_writers_single_winner(setup_store().await, 32).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    #[ignore] // Requires database setup
    async fn test_postgres_many_concurrent_creators() {
        conformance::concurrent_creators_on_fresh_id(setup_store().await, 32).await;
    }
}
