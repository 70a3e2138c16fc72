use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "advtrack", about = "Track advancement completion across worlds")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Local database file (overrides config)
    #[arg(long, global = true)]
    database: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Import advancements from a JSON file
    Import(commands::import::ImportArgs),
    /// Create the schema, a default world and the fixed tabs
    Init,
    /// Recompute percentages and availability once
    Recompute,
    /// Run the web server
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = config::ConfigLoader::load()?;
    if let Some(path) = cli.database {
        config.database.path = path;
        config.database.url = None;
    }

    match cli.command {
        Commands::Config(args) => commands::config::run(args, &config),
        Commands::Import(args) => commands::import::run(args, &config).await,
        Commands::Init => commands::init::run(&config).await,
        Commands::Recompute => commands::recompute::run(&config).await,
        Commands::Serve(args) => commands::serve::run(args, &config).await,
    }
}
