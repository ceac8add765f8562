//! # Admin Authentication Module
//!
//! Guards the dataset upload and statistics endpoints.
//!
//! - `AdminAuth::check_auth`: does a request carry the admin token?
//! - `AdminAuth::login`: exchange admin credentials for the token

pub mod admin;
pub mod crypto;
pub mod errors;

pub use admin::{AdminAuth, LoginGrant};
pub use errors::{AuthError, AuthResult};
