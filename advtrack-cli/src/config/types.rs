use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default port for the advtrack server
pub const DEFAULT_PORT: u16 = 5000;

/// Default host for the advtrack server
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawAdvtrackConfig {
    #[serde(default)]
    pub server: RawServerConfig,

    #[serde(default)]
    pub database: RawDatabaseConfig,
}

/// Server config as stored in TOML (optional fields for proper merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawServerConfig {
    /// Host to bind to
    pub host: Option<String>,

    /// Port for the advtrack server
    pub port: Option<u16>,
}

/// Database config as stored in TOML
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawDatabaseConfig {
    /// Local database file
    pub path: Option<PathBuf>,

    /// Remote Turso database URL; takes precedence over `path`
    pub url: Option<String>,

    /// Auth token for the remote database
    pub auth_token: Option<String>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdvtrackConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: advtrack_paths::default_database_path(),
            url: None,
            auth_token: None,
        }
    }
}
