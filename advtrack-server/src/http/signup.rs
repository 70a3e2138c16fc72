//! Account signup
//!
//! Responses carry either a `message` or an `error` string, never a
//! structured code.

use std::sync::Arc;

use advtrack_core::{SignupForm, StoreError};
use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::AppState;

const SIGNUP_PAGE: &str = include_str!("../../assets/signup.html");

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SignupResponse {
    fn error(status: StatusCode, error: impl ToString) -> Response {
        let body = Self {
            message: None,
            error: Some(error.to_string()),
        };
        (status, Json(body)).into_response()
    }
}

/// GET /signup
pub async fn page() -> Html<&'static str> {
    Html(SIGNUP_PAGE)
}

/// POST /api/signup with `inputName`, `inputEmail`, `inputPassword`
pub async fn create(
    State(state): State<Arc<AppState>>,
    form: Result<Form<SignupForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(e) => return SignupResponse::error(StatusCode::BAD_REQUEST, e.body_text()),
    };

    let request = match form.validate() {
        Ok(request) => request,
        Err(e) => {
            warn!("signup rejected: {}", e);
            return SignupResponse::error(StatusCode::BAD_REQUEST, e);
        }
    };

    // Hashing blocks; run it off the async workers.
    let hashed = tokio::task::spawn_blocking(move || request.into_new_user()).await;
    let user = match hashed {
        Ok(Ok(user)) => user,
        Ok(Err(e)) => return SignupResponse::error(StatusCode::INTERNAL_SERVER_ERROR, e),
        Err(e) => return SignupResponse::error(StatusCode::INTERNAL_SERVER_ERROR, e),
    };

    match state.store.create_user(&user).await {
        Ok(id) => {
            info!(id, email = %user.email, "created user");
            let body = SignupResponse {
                message: Some("User created successfully !".to_string()),
                error: None,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e @ StoreError::UserExists(_)) => SignupResponse::error(StatusCode::CONFLICT, e),
        Err(e) => {
            tracing::error!("signup failed: {}", e);
            SignupResponse::error(StatusCode::INTERNAL_SERVER_ERROR, e)
        }
    }
}
