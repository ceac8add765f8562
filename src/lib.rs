//! course-equivalency - foreign course equivalency lookup service
//!
//! Serves a catalog of study-abroad course equivalencies over a small JSON
//! API: filtered and sorted lookups, filter option lists, and an
//! admin-only dataset upload.

pub mod auth;
pub mod catalog;
pub mod cli;
pub mod http_server;
pub mod observability;
pub mod query;
