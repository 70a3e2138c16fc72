use crate::config::{AdvtrackConfig, ConfigLoader};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (merged)
    Show,
    /// Show configuration file paths
    Path,
}

pub fn run(args: ConfigArgs, config: &AdvtrackConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(config),
        ConfigCommands::Path => show_paths(),
    }
}

fn show_config(config: &AdvtrackConfig) -> Result<()> {
    println!("{}", render(config)?);
    Ok(())
}

/// Effective config as TOML, with any auth token masked
fn render(config: &AdvtrackConfig) -> Result<String> {
    let mut shown = config.clone();
    if shown.database.auth_token.is_some() {
        shown.database.auth_token = Some("********".to_string());
    }
    Ok(toml::to_string_pretty(&shown)?)
}

fn show_paths() -> Result<()> {
    println!("User config:    {:?}", ConfigLoader::user_config_path());
    println!("Project config: {:?}", ConfigLoader::project_config_path());
    Ok(())
}
