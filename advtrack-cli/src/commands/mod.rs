pub mod config;
pub mod import;
pub mod init;
pub mod recompute;
pub mod serve;

use std::sync::Arc;

use advtrack_core::TursoStore;
use anyhow::{Context, Result};

use crate::config::DatabaseConfig;

/// Open the configured database: remote when a URL is set, local file otherwise
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<TursoStore>> {
    let store = match &config.url {
        Some(url) => {
            let token = config.auth_token.as_deref().unwrap_or_default();
            TursoStore::new_remote(url, token)
                .await
                .with_context(|| format!("failed to connect to {}", url))?
        }
        None => TursoStore::new_local(&config.path)
            .await
            .with_context(|| format!("failed to open {}", config.path.display()))?,
    };
    Ok(Arc::new(store))
}
