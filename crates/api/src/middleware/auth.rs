//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use buildtrack_core::error::CoreError;

use crate::auth::jwt::{validate_token, TokenError};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user = %user.username, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The username (from `claims.sub`).
    pub username: String,
    /// The user's role name (e.g. `"Admin"`).
    pub role: String,
    /// The token's unique id (from `claims.jti`).
    pub token_id: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| match e {
            TokenError::MissingSecret => {
                AppError::InternalError("JWT signing secret is not configured".into())
            }
            TokenError::Jwt(_) => {
                AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
            }
        })?;

        Ok(AuthUser {
            username: claims.sub,
            role: claims.role,
            token_id: claims.jti,
        })
    }
}
