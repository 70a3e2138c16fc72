//! Advancement listing and search
//!
//! Both handlers run the recomputation pass over the full advancement set
//! before reading, so rows seeded straight into the database still show
//! derived percentages and availability.

use std::sync::Arc;

use advtrack_core::{Advancement, ParentLink, Tab, World};
use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AppState;
use crate::error::ApiError;

/// Everything the index page renders
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardView {
    pub advancements: Vec<Advancement>,
    pub worlds: Vec<World>,
    pub tabs: Vec<Tab>,
    pub parents: Vec<ParentLink>,
    /// Echo of the submitted search, empty when listing everything
    pub search_query: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    pub search: Option<String>,
}

/// GET /
pub async fn show(State(state): State<Arc<AppState>>) -> Result<Json<DashboardView>, ApiError> {
    state.store.recompute().await?;
    let advancements = state.store.list_advancements().await?;
    view(&state, advancements, String::new()).await
}

/// POST / with form field `search`
pub async fn search(
    State(state): State<Arc<AppState>>,
    form: Result<Form<SearchForm>, FormRejection>,
) -> Result<Json<DashboardView>, ApiError> {
    let Form(form) = form.map_err(|e| ApiError::MalformedPayload(e.body_text()))?;
    let query = form.search.unwrap_or_default().trim().to_string();

    state.store.recompute().await?;
    let advancements = state.store.search_advancements(&query).await?;
    debug!(query, matches = advancements.len(), "searched advancements");

    view(&state, advancements, query).await
}

async fn view(
    state: &AppState,
    advancements: Vec<Advancement>,
    search_query: String,
) -> Result<Json<DashboardView>, ApiError> {
    Ok(Json(DashboardView {
        advancements,
        worlds: state.store.list_worlds().await?,
        tabs: state.store.list_tabs().await?,
        parents: state.store.parent_links().await?,
        search_query,
    }))
}
