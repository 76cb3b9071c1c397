//! Store configuration types
//!
//! Selects which backend [`open_store`](crate::open_store) builds.

use serde::{Deserialize, Serialize};

/// Store backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local, nothing persisted
    Memory,
    /// Embedded SQLite file
    Sqlite,
    /// PostgreSQL server
    Postgres,
    /// Another listkeeper server over HTTP
    Api,
}

impl Default for StoreBackend {
    fn default() -> Self {
        Self::Sqlite
    }
}

/// Store configuration
///
/// # Examples
///
/// ```rust
/// use listkeeper_store::StoreConfig;
///
/// let config = StoreConfig::sqlite("./.data/sqlite.db");
/// let config = StoreConfig::postgres("postgresql://localhost/listkeeper").with_max_connections(20);
/// let config = StoreConfig::api("http://lists.internal:8000");
/// let config = StoreConfig::memory();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend type
    pub backend: StoreBackend,

    /// SQLite file path or URL (required for Sqlite)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Database connection URL (required for Postgres)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,

    /// Remote server URL (required for Api)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Connection pool size for SQL backends
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
}

impl StoreConfig {
    /// In-memory store configuration
    pub fn memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            ..Default::default()
        }
    }

    /// SQLite store configuration
    ///
    /// # Arguments
    /// * `path` - File path, `sqlite://` URL, or `:memory:`
    pub fn sqlite(path: impl Into<String>) -> Self {
        Self {
            backend: StoreBackend::Sqlite,
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// PostgreSQL store configuration
    pub fn postgres(url: impl Into<String>) -> Self {
        Self {
            backend: StoreBackend::Postgres,
            database_url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Remote HTTP store configuration
    pub fn api(url: impl Into<String>) -> Self {
        Self {
            backend: StoreBackend::Api,
            api_url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Set the connection pool size
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = Some(max);
        self
    }

    /// Validate the configuration
    ///
    /// Returns an error if required fields are missing for the selected backend.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing = |backend: &str, field: &str| ConfigError::MissingField {
            backend: backend.to_string(),
            field: field.to_string(),
        };

        match self.backend {
            StoreBackend::Memory => {}
            StoreBackend::Sqlite if self.path.is_none() => return Err(missing("Sqlite", "path")),
            StoreBackend::Postgres if self.database_url.is_none() => {
                return Err(missing("Postgres", "database_url"))
            }
            StoreBackend::Api if self.api_url.is_none() => return Err(missing("Api", "api_url")),
            _ => {}
        }

        if self.max_connections == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "max_connections".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field is missing for the selected backend
    MissingField { backend: String, field: String },
    /// A field holds an unusable value
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingField { backend, field } => {
                write!(f, "{} backend requires {} to be set", backend, field)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "{} {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_config() {
        let config = StoreConfig::sqlite("lists.db");

        assert_eq!(config.backend, StoreBackend::Sqlite);
        assert_eq!(config.path, Some("lists.db".to_string()));
        assert!(config.database_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_postgres_config() {
        let config = StoreConfig::postgres("postgresql://localhost/listkeeper").with_max_connections(4);

        assert_eq!(config.backend, StoreBackend::Postgres);
        assert_eq!(
            config.database_url,
            Some("postgresql://localhost/listkeeper".to_string())
        );
        assert_eq!(config.max_connections, Some(4));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_and_memory_config() {
        assert!(StoreConfig::api("http://localhost:8000").validate().is_ok());
        assert!(StoreConfig::memory().validate().is_ok());
    }

    #[test]
    fn test_validation_missing_fields() {
        for backend in [StoreBackend::Sqlite, StoreBackend::Postgres, StoreBackend::Api] {
            let config = StoreConfig {
                backend,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::MissingField { .. })),
                "{:?} should require a location",
                backend
            );
        }
    }

    #[test]
    fn test_validation_zero_connections() {
        let config = StoreConfig::sqlite("lists.db").with_max_connections(0);
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "max_connections must be at least 1");
    }

    #[test]
    fn test_deserialize_backend_names() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"backend": "postgres", "database_url": "postgresql://db"}"#)
                .unwrap();
        assert_eq!(config.backend, StoreBackend::Postgres);
        assert_eq!(StoreBackend::default(), StoreBackend::Sqlite);
    }
}
