//! # Auth Errors
//!
//! Error types for the admin authentication module.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Username or password wrong (generic, never says which)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing or wrong admin token
    #[error("Unauthorized")]
    Unauthorized,

    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::InvalidCredentials => 401,
            AuthError::Unauthorized => 401,
            AuthError::HashingFailed => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), 401);
        assert_eq!(AuthError::Unauthorized.status_code(), 401);
        assert_eq!(AuthError::HashingFailed.status_code(), 500);
    }

    #[test]
    fn test_error_messages_do_not_leak_info() {
        let err = AuthError::InvalidCredentials;
        assert!(!err.to_string().contains("password"));
        assert!(!err.to_string().contains("username"));
    }
}
