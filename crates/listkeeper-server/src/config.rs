//! Server configuration

use listkeeper_store::StoreConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where lists are persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreType {
    /// In-process store, lost on restart
    Memory,
    /// Embedded SQLite database file
    Sqlite {
        /// Database file (default: "./.data/sqlite.db")
        #[serde(default = "default_sqlite_path")]
        path: PathBuf,
    },
    /// PostgreSQL server
    Postgres {
        /// Database connection URL
        url: String,
        /// Connection pool size
        #[serde(default)]
        max_connections: Option<u32>,
    },
    /// Another listkeeper server
    Api {
        /// Base URL of the remote server
        base_url: String,
    },
}

fn default_sqlite_path() -> PathBuf {
    PathBuf::from("./.data/sqlite.db")
}

impl Default for StoreType {
    fn default() -> Self {
        StoreType::Sqlite {
            path: default_sqlite_path(),
        }
    }
}

impl StoreType {
    /// Convert to the store crate's backend configuration
    pub fn to_store_config(&self) -> StoreConfig {
        match self {
            StoreType::Memory => StoreConfig::memory(),
            StoreType::Sqlite { path } => StoreConfig::sqlite(path.to_string_lossy()),
            StoreType::Postgres {
                url,
                max_connections,
            } => {
                let config = StoreConfig::postgres(url.clone());
                match max_connections {
                    Some(max) => config.with_max_connections(*max),
                    None => config,
                }
            }
            StoreType::Api { base_url } => StoreConfig::api(base_url.clone()),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// List storage backend
    pub store: StoreType,

    /// Log level used when RUST_LOG is not set
    pub log_level: String,

    /// Log output format
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            store: StoreType::default(),
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, `config/server.*` and the environment
    ///
    /// Later sources win: `.env`, then the config file, then `LISTKEEPER_*`
    /// variables (`__` separates nested keys, e.g. `LISTKEEPER_STORE__TYPE`),
    /// then the bare `PORT` variable.
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/server").required(false))
            .add_source(
                config::Environment::with_prefix("LISTKEEPER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to read config: {}", e))?;

        let mut server: Self = config
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))?;

        server.apply_port_override(std::env::var("PORT").ok().as_deref())?;
        Ok(server)
    }

    /// Apply the hosting platform's `PORT` variable, if set
    pub fn apply_port_override(&mut self, port: Option<&str>) -> anyhow::Result<()> {
        if let Some(port) = port {
            self.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT '{}': {}", port, e))?;
        }
        Ok(())
    }

    /// Socket address string to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Default tracing filter directives for this config
    pub fn default_log_filter(&self) -> String {
        format!(
            "listkeeper_server={level},listkeeper_store={level},tower_http=debug",
            level = self.log_level
        )
    }
}
