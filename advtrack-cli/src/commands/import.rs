//! Bulk-load advancements from a JSON file

use std::path::PathBuf;

use advtrack_core::{AdvancementStore, seed};
use anyhow::{Context, Result};
use clap::Args;

use super::open_store;
use crate::config::AdvtrackConfig;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON array of advancements
    pub file: PathBuf,
}

pub async fn run(args: ImportArgs, config: &AdvtrackConfig) -> Result<()> {
    let contents = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let rows = seed::parse_import(&contents)?;

    let store = open_store(&config.database).await?;
    let result = store.import_advancements(&rows).await?;

    println!("Imported {} advancement(s)", rows.len());
    print!("{}", super::recompute::summary(&result));
    Ok(())
}
