//! Admin HTTP Routes
//!
//! Token-protected endpoints:
//!
//! - `GET /admin/stats` - collection totals
//! - `POST /admin/upload` - replace the whole dataset from a multipart file

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, Request, State},
    http::header::AUTHORIZATION,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::info;

use super::errors::{ApiError, ApiResult};
use super::state::AppState;
use crate::catalog::parse_dataset;
use crate::query::CatalogStats;

/// Admin routes, all behind the token check
pub fn admin_routes(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/admin/stats", get(stats_handler))
        .route(
            "/admin/upload",
            post(upload_handler).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .with_state(state)
}

/// Rejects requests without the admin token
async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    state.auth.require(authorization)?;

    Ok(next.run(request).await)
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub count: usize,
}

/// Stats handler
async fn stats_handler(State(state): State<Arc<AppState>>) -> Json<CatalogStats> {
    let snapshot = state.catalog.snapshot();
    Json(CatalogStats::from_records(&snapshot))
}

/// Upload handler
async fn upload_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadResponse>> {
    let mut multipart = multipart.map_err(|e| ApiError::Upload(e.to_string()))?;
    let (file_name, data) = read_dataset_file(&mut multipart).await?;

    let records = parse_dataset(&data)?;
    let snapshot = state.catalog.replace_all(records, state.persist_uploads)?;

    info!(file = %file_name, count = snapshot.len(), "dataset uploaded");
    Ok(Json(UploadResponse {
        success: true,
        count: snapshot.len(),
    }))
}

/// First field that carries a file, or the field named `file`
async fn read_dataset_file(multipart: &mut Multipart) -> ApiResult<(String, Bytes)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Upload(e.to_string()))?
    {
        if field.file_name().is_none() && field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("unnamed").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::Upload(e.to_string()))?;
        return Ok((file_name, data));
    }

    Err(ApiError::Upload("No file provided".to_string()))
}
