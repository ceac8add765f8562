//! # HTTP Server Module
//!
//! JSON-over-HTTP API consumed by the browser client.
//!
//! # Endpoints
//!
//! - `GET /api/courses` - filtered and sorted course records
//! - `GET /api/filters` - filter option lists
//! - `POST /api/login` - admin credentials for the admin token
//! - `GET /api/admin/stats` - collection totals (token required)
//! - `POST /api/admin/upload` - replace the dataset (token required)
//! - `GET /api/health` - liveness probe

pub mod admin_routes;
pub mod auth_routes;
pub mod config;
pub mod course_routes;
pub mod errors;
pub mod health_routes;
pub mod server;
pub mod state;

pub use config::{Environment, HttpServerConfig};
pub use errors::{ApiError, ApiResult};
pub use server::{build_router, HttpServer};
pub use state::AppState;
