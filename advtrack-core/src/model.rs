//! Row types for the advancement tracker tables

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculator::AdvancementState;

/// A trackable milestone with a completion flag and optional parent gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advancement {
    pub id: i64,
    pub name: String,
    /// Tab (category) this advancement is listed under
    pub tab_id: i64,
    pub description: String,
    pub completion_percentage: f64,
    pub is_completed: bool,
    /// Derived from the parent's completion flag, never set by users
    pub is_available: bool,
    pub parent_id: Option<i64>,
    pub rewards: Option<String>,
    pub resource_path: Option<String>,
}

impl Advancement {
    /// The subset of columns the completion calculator needs
    pub fn state(&self) -> AdvancementState {
        AdvancementState {
            id: self.id,
            tab_id: self.tab_id,
            is_completed: self.is_completed,
            parent_id: self.parent_id,
        }
    }
}

/// Aggregate container whose percentage spans every advancement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub id: i64,
    pub name: String,
    pub completion_percentage: f64,
    pub created_at: DateTime<Utc>,
}

/// One of the fixed advancement categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: i64,
    pub world_id: i64,
    pub name: String,
    pub completion_percentage: f64,
}

/// An advancement joined with its parent row, if the parent resolves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentLink {
    pub advancement_id: i64,
    pub parent_id: Option<i64>,
    /// `None` when there is no parent or the parent id is dangling
    pub parent_name: Option<String>,
}

/// Advancement row to insert (seeding and import)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAdvancement {
    pub id: i64,
    pub name: String,
    pub tab_id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub rewards: Option<String>,
    #[serde(default)]
    pub resource_path: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Tab row to insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewTab {
    pub id: i64,
    pub world_id: i64,
    pub name: String,
}

/// Validated account with an already-hashed password
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_copies_calculator_columns() {
        let advancement = Advancement {
            id: 7,
            name: "We Need to Go Deeper".into(),
            tab_id: 1,
            description: "Build, light and enter a Nether Portal".into(),
            completion_percentage: 0.0,
            is_completed: true,
            is_available: false,
            parent_id: Some(3),
            rewards: None,
            resource_path: None,
        };

        let state = advancement.state();
        assert_eq!(state.id, 7);
        assert_eq!(state.tab_id, 1);
        assert!(state.is_completed);
        assert_eq!(state.parent_id, Some(3));
    }

    #[test]
    fn test_new_advancement_optional_fields_default() {
        let json = r#"{"id": 1, "name": "Minecraft", "tab_id": 1}"#;
        let parsed: NewAdvancement = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.description, "");
        assert!(parsed.parent_id.is_none());
        assert!(parsed.rewards.is_none());
        assert!(!parsed.completed);
    }
}
