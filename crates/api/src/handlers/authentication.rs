//! Handler for the `/authentication` resource.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::credentials::authenticate as check_credentials;
use crate::error::AppResult;
use crate::state::AppState;

/// Request body for `POST /authentication/authenticate`.
#[derive(Debug, Deserialize)]
pub struct AuthenticateRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct AuthenticateResponse {
    pub username: String,
    pub role: String,
    /// Bearer token, valid for 30 minutes.
    pub token: String,
}

/// POST /api/v1/authentication/authenticate
///
/// Exchange the admin username and password for a signed access token.
pub async fn authenticate(
    State(state): State<AppState>,
    Json(input): Json<AuthenticateRequest>,
) -> AppResult<Json<AuthenticateResponse>> {
    let result = check_credentials(
        &state.config.admin,
        &state.config.jwt,
        &input.username,
        &input.password,
    )
    .inspect_err(|e| {
        tracing::warn!(username = %input.username, error = %e, "Login rejected");
    })?;

    tracing::info!(username = %result.username, "User logged in");

    Ok(Json(AuthenticateResponse {
        username: result.username,
        role: result.role,
        token: result.token,
    }))
}
