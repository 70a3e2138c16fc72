//! Shared application state for the advtrack server

use std::sync::Arc;

use advtrack_core::AdvancementStore;
use chrono::{DateTime, Utc};

/// Shared application state accessible by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database client; each call opens and releases its own connection
    pub store: Arc<dyn AdvancementStore>,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: Arc<dyn AdvancementStore>) -> Self {
        Self {
            store,
            started_at: Utc::now(),
        }
    }

    /// Returns how long the server has been running
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}
