//! Course lookup routes
//!
//! - `GET /courses` - filtered, optionally sorted course records
//! - `GET /filters` - distinct values for each filter

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::debug;

use super::state::AppState;
use crate::query::{find_courses, CourseQuery, FilterOptions};

/// Create course lookup routes
pub fn course_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/courses", get(courses_handler))
        .route("/filters", get(filters_handler))
        .with_state(state)
}

/// Course lookup handler
async fn courses_handler(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let query = CourseQuery::from_pairs(pairs);
    let snapshot = state.catalog.snapshot();
    let results = find_courses(&snapshot, &query);

    debug!(
        search = query.search.as_deref().unwrap_or(""),
        total = snapshot.len(),
        matched = results.len(),
        "course lookup"
    );

    Json(results).into_response()
}

/// Filter options handler
async fn filters_handler(State(state): State<Arc<AppState>>) -> Json<FilterOptions> {
    let snapshot = state.catalog.snapshot();
    Json(FilterOptions::from_records(&snapshot))
}
