//! JWT access-token generation and validation.
//!
//! Tokens are HS256-signed and carry a [`Claims`] payload naming the user and
//! their role. Issuer and audience are checked on every validation. When no
//! signing secret is configured both directions fail with
//! [`TokenError::MissingSecret`] rather than falling back to a default key.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifetime of an access token in minutes.
pub const ACCESS_TOKEN_LIFETIME_MINS: i64 = 30;

const DEFAULT_ISSUER: &str = "buildtrack";
const DEFAULT_AUDIENCE: &str = "buildtrack-api";

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the username.
    pub sub: String,
    /// The user's role name (e.g. `"Admin"`).
    pub role: String,
    /// Unique token identifier (UUID v4).
    pub jti: String,
    pub iss: String,
    pub aud: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("JWT signing secret is not configured")]
    MissingSecret,

    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: Option<String>,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var        | Required | Default          |
    /// |----------------|----------|------------------|
    /// | `JWT_SECRET`   | **yes**  | --               |
    /// | `JWT_ISSUER`   | no       | `buildtrack`     |
    /// | `JWT_AUDIENCE` | no       | `buildtrack-api` |
    ///
    /// A missing secret is not fatal here; token operations report it.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty());
        if secret.is_none() {
            tracing::warn!(
                "JWT_SECRET is not set; authentication will fail until it is configured"
            );
        }

        Self {
            secret,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_ISSUER.into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.into()),
        }
    }

    fn secret(&self) -> Result<&[u8], TokenError> {
        match self.secret.as_deref() {
            Some(secret) if !secret.is_empty() => Ok(secret.as_bytes()),
            _ => Err(TokenError::MissingSecret),
        }
    }
}

/// Generate an HS256 access token for `username` with the given role.
///
/// The token expires [`ACCESS_TOKEN_LIFETIME_MINS`] after issuance and carries
/// a fresh `jti`.
pub fn generate_access_token(
    username: &str,
    role: &str,
    config: &JwtConfig,
) -> Result<String, TokenError> {
    let secret = config.secret()?;
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: username.to_string(),
        role: role.to_string(),
        jti: Uuid::new_v4().to_string(),
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
        iat: now,
        exp: now + ACCESS_TOKEN_LIFETIME_MINS * 60,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )?)
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks signature, expiry, issuer and audience.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    let secret = config.secret()?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    /// Helper to build a test config with a known secret.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: Some("test-secret-that-is-long-enough-for-hmac".to_string()),
            issuer: "test-issuer".to_string(),
            audience: "test-audience".to_string(),
        }
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let config = test_config();
        let token = generate_access_token("site-admin", "Admin", &config)
            .expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, "site-admin");
        assert_eq!(claims.role, "Admin");
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-audience");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_each_token_gets_a_unique_id() {
        let config = test_config();
        let a = generate_access_token("u", "Admin", &config).unwrap();
        let b = generate_access_token("u", "Admin", &config).unwrap();
        let a = validate_token(&a, &config).unwrap();
        let b = validate_token(&b, &config).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();

        // Use a margin well beyond the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "site-admin".to_string(),
            role: "Admin".to_string(),
            jti: Uuid::new_v4().to_string(),
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
            iat: now - 3600,
            exp: now - 300,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret-that-is-long-enough-for-hmac"),
        )
        .expect("encoding should succeed");

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = test_config();
        let config_b = JwtConfig {
            secret: Some("another-secret".to_string()),
            ..test_config()
        };

        let token = generate_access_token("u", "Admin", &config_a).unwrap();
        assert!(validate_token(&token, &config_b).is_err());
    }

    #[test]
    fn test_wrong_audience_fails() {
        let token = generate_access_token("u", "Admin", &test_config()).unwrap();
        let other = JwtConfig {
            audience: "someone-else".to_string(),
            ..test_config()
        };
        assert!(validate_token(&token, &other).is_err());
    }

    #[test]
    fn test_missing_secret_fails_closed() {
        let config = JwtConfig {
            secret: None,
            ..test_config()
        };
        assert_matches!(
            generate_access_token("u", "Admin", &config),
            Err(TokenError::MissingSecret)
        );
        assert_matches!(
            validate_token("anything", &config),
            Err(TokenError::MissingSecret)
        );

        let empty = JwtConfig {
            secret: Some(String::new()),
            ..test_config()
        };
        assert_matches!(
            generate_access_token("u", "Admin", &empty),
            Err(TokenError::MissingSecret)
        );
    }
}
