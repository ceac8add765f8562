//! # Admin Authentication
//!
//! One static bearer token guards the admin endpoints. Logging in with the
//! configured admin credentials hands that same token back to the client.
//!
//! The password is kept only as an Argon2id hash; all secret comparisons are
//! constant time.

use serde::Serialize;
use tracing::warn;

use super::crypto::{constant_time_str_eq, hash_password, verify_password};
use super::errors::{AuthError, AuthResult};

const BEARER_PREFIX: &str = "Bearer ";

/// Successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginGrant {
    pub success: bool,
    pub token: String,
    pub username: String,
}

/// Static-token admin authentication
#[derive(Clone)]
pub struct AdminAuth {
    token: String,
    username: String,
    password_hash: Option<String>,
}

impl std::fmt::Debug for AdminAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAuth")
            .field("username", &self.username)
            .field("login_enabled", &self.password_hash.is_some())
            .finish_non_exhaustive()
    }
}

impl AdminAuth {
    /// Create admin auth.
    ///
    /// Without a password every login attempt is rejected; the token still
    /// works for clients that were given it out of band.
    pub fn new(
        token: impl Into<String>,
        username: impl Into<String>,
        password: Option<&str>,
    ) -> AuthResult<Self> {
        let password_hash = match password.filter(|p| !p.is_empty()) {
            Some(p) => Some(hash_password(p)?),
            None => {
                warn!("no admin password configured, admin login disabled");
                None
            }
        };

        Ok(Self {
            token: token.into(),
            username: username.into(),
            password_hash,
        })
    }

    /// Whether an `Authorization` header value carries the admin token.
    ///
    /// Accepts `Bearer <token>` or the bare token.
    pub fn check_auth(&self, authorization: Option<&str>) -> bool {
        let Some(value) = authorization else {
            return false;
        };
        let presented = value.strip_prefix(BEARER_PREFIX).unwrap_or(value);
        constant_time_str_eq(presented, &self.token)
    }

    /// Like `check_auth`, as a `Result`
    pub fn require(&self, authorization: Option<&str>) -> AuthResult<()> {
        if self.check_auth(authorization) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized)
        }
    }

    /// Exchange admin credentials for the token
    pub fn login(&self, username: &str, password: &str) -> AuthResult<LoginGrant> {
        let Some(hash) = &self.password_hash else {
            return Err(AuthError::InvalidCredentials);
        };

        // Check both so timing does not reveal which one was wrong
        let username_ok = constant_time_str_eq(username, &self.username);
        let password_ok = verify_password(password, hash)?;

        if username_ok && password_ok {
            Ok(LoginGrant {
                success: true,
                token: self.token.clone(),
                username: self.username.clone(),
            })
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> AdminAuth {
        AdminAuth::new("secret-token", "registrar", Some("s3cret")).unwrap()
    }

    #[test]
    fn test_login_returns_token() {
        let grant = auth().login("registrar", "s3cret").unwrap();
        assert!(grant.success);
        assert_eq!(grant.token, "secret-token");
        assert_eq!(grant.username, "registrar");
    }

    #[test]
    fn test_login_rejects_wrong_password_or_user() {
        let auth = auth();
        assert!(matches!(
            auth.login("registrar", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("someone", "s3cret"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_login_disabled_without_password() {
        let auth = AdminAuth::new("secret-token", "registrar", None).unwrap();
        assert!(matches!(
            auth.login("registrar", ""),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_check_auth_header_forms() {
        let auth = auth();
        assert!(auth.check_auth(Some("Bearer secret-token")));
        assert!(auth.check_auth(Some("secret-token")));
        assert!(!auth.check_auth(Some("Bearer wrong")));
        assert!(!auth.check_auth(Some("Basic secret-token")));
        assert!(!auth.check_auth(None));
        assert!(auth.require(Some("Bearer secret-token")).is_ok());
        assert!(matches!(auth.require(None), Err(AuthError::Unauthorized)));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let debug = format!("{:?}", auth());
        assert!(!debug.contains("secret-token"));
        assert!(!debug.contains("argon2"));
    }
}
