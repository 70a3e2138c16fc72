//! Initial data: the fixed tab set and advancement import files

use crate::calculator::Category;
use crate::model::{NewAdvancement, NewTab};
use crate::storage::{Result, StoreError};

/// Name given to the world created by `advtrack init`.
pub const DEFAULT_WORLD_NAME: &str = "New World";

/// The five fixed tabs, attached to `world_id`
pub fn default_tabs(world_id: i64) -> Vec<NewTab> {
    Category::ALL
        .iter()
        .map(|category| NewTab {
            id: category.tab_id(),
            world_id,
            name: category.name().to_string(),
        })
        .collect()
}

/// Parse an import file: a JSON array of advancement rows.
///
/// Rejects duplicate ids up front so a bad file fails before touching the
/// database.
pub fn parse_import(json: &str) -> Result<Vec<NewAdvancement>> {
    let rows: Vec<NewAdvancement> = serde_json::from_str(json)?;

    let mut seen = std::collections::HashSet::new();
    for row in &rows {
        if !seen.insert(row.id) {
            return Err(StoreError::InvalidData(format!(
                "duplicate advancement id {} in import",
                row.id
            )));
        }
    }

    Ok(rows)
}
