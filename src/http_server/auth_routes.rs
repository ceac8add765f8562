//! Auth HTTP Routes
//!
//! `POST /login` trades the admin credentials for the admin token.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use serde::Deserialize;
use tracing::info;

use super::errors::{ApiError, ApiResult};
use super::state::AppState;
use crate::auth::LoginGrant;

/// Auth routes with shared state
pub fn auth_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/login", post(login_handler))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login handler
async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginGrant>> {
    // Argon2 verification is CPU-bound
    let grant = tokio::task::spawn_blocking(move || {
        state.auth.login(&request.username, &request.password)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    info!(username = %grant.username, "admin login");
    Ok(Json(grant))
}
