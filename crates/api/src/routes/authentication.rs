//! Route definitions for the `/authentication` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::authentication;
use crate::state::AppState;

/// Routes mounted at `/authentication`.
///
/// ```text
/// POST /authenticate    -> authenticate
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/authenticate", post(authentication::authenticate))
}
