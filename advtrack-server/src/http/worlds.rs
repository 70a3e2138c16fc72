//! World management
//!
//! Both routes accept GET (fields in the query string) and POST (urlencoded
//! body) and redirect to the index on success.

use std::sync::Arc;

use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::Redirect,
};
use serde::Deserialize;
use tracing::info;

use super::non_blank;
use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct AddWorldForm {
    #[serde(rename = "WorldBox")]
    pub world_box: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteWorldForm {
    #[serde(rename = "WorldDropdown")]
    pub world_dropdown: Option<String>,
}

/// GET|POST /addWorld with field `WorldBox`
pub async fn add(
    State(state): State<Arc<AppState>>,
    form: Result<Form<AddWorldForm>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let Form(form) = form.map_err(|e| ApiError::MalformedPayload(e.body_text()))?;
    let name = non_blank(form.world_box).ok_or(ApiError::MissingField("WorldBox"))?;

    let world = state.store.add_world(&name).await?;
    info!(id = world.id, name = %world.name, "added world");

    Ok(Redirect::to("/"))
}

/// GET|POST /deleteWorld with field `WorldDropdown` holding a world id
pub async fn delete(
    State(state): State<Arc<AppState>>,
    form: Result<Form<DeleteWorldForm>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let Form(form) = form.map_err(|e| ApiError::MalformedPayload(e.body_text()))?;
    let raw = non_blank(form.world_dropdown).ok_or(ApiError::MissingField("WorldDropdown"))?;
    let id: i64 = raw.parse().map_err(|_| ApiError::InvalidField {
        field: "WorldDropdown",
        value: raw.clone(),
    })?;

    let deleted = state.store.delete_world(id).await?;
    info!(id, deleted, "delete world requested");

    Ok(Redirect::to("/"))
}
