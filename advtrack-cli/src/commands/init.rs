//! Create the schema and the fixed tab set

use advtrack_core::{AdvancementStore, seed};
use anyhow::Result;
use tracing::info;

use super::open_store;
use crate::config::AdvtrackConfig;

pub async fn run(config: &AdvtrackConfig) -> Result<()> {
    let store = open_store(&config.database).await?;

    let world_id = match store.list_worlds().await?.first() {
        Some(world) => world.id,
        None => {
            let world = store.add_world(seed::DEFAULT_WORLD_NAME).await?;
            info!(id = world.id, "created default world");
            world.id
        }
    };

    let inserted = store.insert_tabs(&seed::default_tabs(world_id)).await?;
    println!(
        "Database ready at {} ({} tab(s) added)",
        config.database.path.display(),
        inserted
    );
    Ok(())
}
