//! The single configured admin account and the authenticate operation.

use buildtrack_core::error::CoreError;
use buildtrack_core::roles::ROLE_ADMIN;

use crate::auth::jwt::{generate_access_token, JwtConfig, TokenError};

/// The one username/password pair allowed to log in.
///
/// There is no user store; whoever presents this pair is the admin.
#[derive(Clone, Default)]
pub struct AdminCredentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl AdminCredentials {
    /// Load the admin pair from `ADMIN_USERNAME` / `ADMIN_PASSWORD`.
    ///
    /// If either is missing every login attempt is rejected.
    pub fn from_env() -> Self {
        let creds = Self {
            username: std::env::var("ADMIN_USERNAME").ok().filter(|s| !s.is_empty()),
            password: std::env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),
        };
        if !creds.is_configured() {
            tracing::warn!("ADMIN_USERNAME/ADMIN_PASSWORD not set; all logins will be rejected");
        }
        creds
    }

    pub fn is_configured(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    /// Direct equality check against the configured pair.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        match (&self.username, &self.password) {
            (Some(u), Some(p)) => u == username && p == password,
            _ => false,
        }
    }
}

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub username: String,
    pub role: String,
    pub token: String,
}

/// Check `username`/`password` against the admin pair and issue a token.
///
/// Wrong credentials yield [`CoreError::Unauthorized`]. A missing signing
/// secret yields [`CoreError::Internal`]: no token is issued without one.
pub fn authenticate(
    admin: &AdminCredentials,
    jwt: &JwtConfig,
    username: &str,
    password: &str,
) -> Result<Authenticated, CoreError> {
    if !admin.matches(username, password) {
        return Err(CoreError::Unauthorized(
            "Invalid username or password".into(),
        ));
    }

    let token = generate_access_token(username, ROLE_ADMIN, jwt).map_err(|e| match e {
        TokenError::MissingSecret => {
            CoreError::Internal("Server authentication is not configured".into())
        }
        TokenError::Jwt(e) => CoreError::Internal(format!("Token generation error: {e}")),
    })?;

    Ok(Authenticated {
        username: username.to_string(),
        role: ROLE_ADMIN.to_string(),
        token,
    })
}
