//! Role-based access control (RBAC) extractors.
//!
//! Reads are public; every write handler takes [`RequireAdmin`] as its first
//! extractor, so unauthenticated or under-privileged requests are rejected
//! before the body is parsed or the store is touched.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use buildtrack_core::error::CoreError;
use buildtrack_core::roles::ROLE_ADMIN;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `Admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            tracing::warn!(
                user = %user.username,
                role = %user.role,
                "Write rejected: admin role required"
            );
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}
