//! Observability for the course service
//!
//! Logging goes through `tracing`; this module installs the subscriber.
//! Request spans come from `tower_http::trace::TraceLayer` in the router.

mod logger;

pub use logger::{init_logging, LogFormat, DEFAULT_FILTER};
