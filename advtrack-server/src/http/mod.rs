//! HTTP server module

mod advancements;
mod api;
mod dashboard;
mod signup;
mod worlds;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub use api::HealthResponse;
pub use dashboard::DashboardView;
pub use signup::SignupResponse;

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard::show).post(dashboard::search))
        .route("/toggle/:id", post(advancements::toggle))
        .route("/addWorld", get(worlds::add).post(worlds::add))
        .route("/deleteWorld", get(worlds::delete).post(worlds::delete))
        .route("/signup", get(signup::page))
        .route("/api/signup", post(signup::create))
        .route("/api/health", get(api::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Trimmed, non-empty form value
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use advtrack_core::{AdvancementStore, NewAdvancement, TursoStore, seed};
    use axum_test::TestServer;
    use tempfile::TempDir;

    use super::create_router;
    use crate::AppState;

    pub fn advancement(id: i64, name: &str, tab_id: i64, parent_id: Option<i64>) -> NewAdvancement {
        NewAdvancement {
            id,
            name: name.to_string(),
            tab_id,
            description: String::new(),
            parent_id,
            rewards: None,
            resource_path: None,
            completed: false,
        }
    }

    /// Test server over a fresh on-disk database with one world, the fixed
    /// tabs and the given advancements.
    pub async fn server_with(rows: &[NewAdvancement]) -> (TempDir, Arc<TursoStore>, TestServer) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(
            TursoStore::new_local(&dir.path().join("test.db"))
                .await
                .unwrap(),
        );
        let world = store.add_world("Survival").await.unwrap();
        store.insert_tabs(&seed::default_tabs(world.id)).await.unwrap();
        store.import_advancements(rows).await.unwrap();

        let state = Arc::new(AppState::new(store.clone()));
        let server = TestServer::new(create_router(state)).unwrap();
        (dir, store, server)
    }
}
