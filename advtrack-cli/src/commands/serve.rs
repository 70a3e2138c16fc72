//! Run the web server in the foreground

use advtrack_server::{AdvtrackServer, ServerConfig};
use anyhow::Result;
use clap::Args;
use tracing::info;

use super::open_store;
use crate::config::AdvtrackConfig;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    pub host: Option<String>,
}

/// Resolve the bind address: flags win over config
fn server_config(args: &ServeArgs, config: &AdvtrackConfig) -> ServerConfig {
    ServerConfig::new(
        args.host.clone().unwrap_or_else(|| config.server.host.clone()),
        args.port.unwrap_or(config.server.port),
    )
}

/// Run the serve command
pub async fn run(args: ServeArgs, config: &AdvtrackConfig) -> Result<()> {
    let server_config = server_config(&args, config);
    let store = open_store(&config.database).await?;

    info!("Starting advtrack server on {}", server_config.addr());

    AdvtrackServer::new(server_config, store)
        .run()
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = ServeArgs {
            port: Some(8123),
            host: None,
        };
        let config = AdvtrackConfig::default();

        let resolved = server_config(&args, &config);

        assert_eq!(resolved.port, 8123);
        assert_eq!(resolved.host, config.server.host);
    }
}
