use super::types::{
    AdvtrackConfig, DEFAULT_HOST, DEFAULT_PORT, DatabaseConfig, RawAdvtrackConfig,
    RawDatabaseConfig, RawServerConfig, ServerConfig,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<AdvtrackConfig> {
        Self::load_layers(&Self::user_config_path(), &Self::project_config_path())
    }

    /// Merge the config files at `user` and `project`; missing files are skipped
    pub fn load_layers(user: &Path, project: &Path) -> Result<AdvtrackConfig> {
        let mut raw = RawAdvtrackConfig::default();

        // Layer 1: User config
        if let Some(user_config) = Self::read_raw(user)? {
            raw = Self::merge_raw(raw, user_config);
        }

        // Layer 2: Project config
        if let Some(project_config) = Self::read_raw(project)? {
            raw = Self::merge_raw(raw, project_config);
        }

        Ok(Self::finalize(raw))
    }

    /// Get user config path (`$XDG_CONFIG_HOME/advtrack/config.toml`)
    pub fn user_config_path() -> PathBuf {
        advtrack_paths::config_dir().join("config.toml")
    }

    /// Get project config path
    /// Can be overridden with ADVTRACK_PROJECT_CONFIG_DIR env var
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("ADVTRACK_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".advtrack/config.toml")
        }
    }

    fn read_raw(path: &Path) -> Result<Option<RawAdvtrackConfig>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let raw = toml::from_str(&contents)
            .with_context(|| format!("invalid config in {}", path.display()))?;
        tracing::debug!("loaded config layer {}", path.display());
        Ok(Some(raw))
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawAdvtrackConfig, overlay: RawAdvtrackConfig) -> RawAdvtrackConfig {
        RawAdvtrackConfig {
            server: RawServerConfig {
                host: overlay.server.host.or(base.server.host),
                port: overlay.server.port.or(base.server.port),
            },
            database: RawDatabaseConfig {
                path: overlay.database.path.or(base.database.path),
                url: overlay.database.url.or(base.database.url),
                auth_token: overlay.database.auth_token.or(base.database.auth_token),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawAdvtrackConfig) -> AdvtrackConfig {
        AdvtrackConfig {
            server: ServerConfig {
                host: raw.server.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: raw.server.port.unwrap_or(DEFAULT_PORT),
            },
            database: DatabaseConfig {
                path: raw
                    .database
                    .path
                    .unwrap_or_else(advtrack_paths::default_database_path),
                url: raw.database.url,
                auth_token: raw.database.auth_token,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_files_give_defaults() {
        let temp_dir = TempDir::new().unwrap();

        let config = ConfigLoader::load_layers(
            &temp_dir.path().join("user.toml"),
            &temp_dir.path().join("project.toml"),
        )
        .unwrap();

        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn test_project_overrides_user() {
        let temp_dir = TempDir::new().unwrap();
        let user = temp_dir.path().join("user.toml");
        let project = temp_dir.path().join("project.toml");
        std::fs::write(
            &user,
            "[server]\nhost = \"0.0.0.0\"\nport = 8000\n\n[database]\npath = \"/data/user.db\"\n",
        )
        .unwrap();
        std::fs::write(&project, "[server]\nport = 9000\n").unwrap();

        let config = ConfigLoader::load_layers(&user, &project).unwrap();

        assert_eq!(config.server.port, 9000);
        // Unset in project, so user value survives
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.path, PathBuf::from("/data/user.db"));
    }

    #[test]
    fn test_remote_database_settings() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("project.toml");
        std::fs::write(
            &project,
            "[database]\nurl = \"libsql://tracker.turso.io\"\nauth_token = \"secret\"\n",
        )
        .unwrap();

        let config =
            ConfigLoader::load_layers(&temp_dir.path().join("none.toml"), &project).unwrap();

        assert_eq!(
            config.database.url.as_deref(),
            Some("libsql://tracker.turso.io")
        );
        assert_eq!(config.database.auth_token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("project.toml");
        std::fs::write(&project, "[server\nport = ").unwrap();

        let result = ConfigLoader::load_layers(&temp_dir.path().join("none.toml"), &project);

        assert!(result.is_err());
    }

    #[test]
    fn test_user_config_path_is_toml() {
        assert!(ConfigLoader::user_config_path().ends_with("advtrack/config.toml"));
    }
}
