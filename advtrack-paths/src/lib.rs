//! XDG Base Directory paths for advtrack.
//!
//! The CLI resolves its config file and default database location from
//! XDG paths on every platform rather than platform-native ones.

use std::path::PathBuf;

/// File name of the default embedded database.
pub const DATABASE_FILE: &str = "advtrack.db";

/// Get the advtrack config directory.
///
/// Returns `$XDG_CONFIG_HOME/advtrack` if set, otherwise `~/.config/advtrack`.
///
/// # Examples
///
/// ```
/// use advtrack_paths::config_dir;
///
/// let config = config_dir();
/// let file = config.join("config.toml");
/// ```
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("advtrack")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".config/advtrack")
    } else {
        PathBuf::from(".config/advtrack")
    }
}

/// Get the advtrack data directory.
///
/// Returns `$XDG_DATA_HOME/advtrack` if set, otherwise `~/.local/share/advtrack`.
pub fn data_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("advtrack")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".local/share/advtrack")
    } else {
        PathBuf::from(".local/share/advtrack")
    }
}

/// Path of the embedded database used when no other location is configured.
pub fn default_database_path() -> PathBuf {
    data_dir().join(DATABASE_FILE)
}
