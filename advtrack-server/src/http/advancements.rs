//! Completion toggling

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::info;

use crate::AppState;
use crate::error::ApiError;

/// POST /toggle/:id
///
/// Flips the completion flag and recomputes every derived value in the same
/// transaction, then sends the browser back to the index.
pub async fn toggle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Redirect, ApiError> {
    match state.store.toggle_advancement(id).await? {
        Some(completed) => {
            info!(id, completed, "toggled advancement");
            Ok(Redirect::to("/"))
        }
        None => Err(ApiError::NotFound(format!("advancement {} not found", id))),
    }
}
