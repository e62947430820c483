#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use buildtrack_api::auth::credentials::AdminCredentials;
use buildtrack_api::auth::jwt::{generate_access_token, JwtConfig};
use buildtrack_api::config::{ServerConfig, StorageBackend};
use buildtrack_api::router::build_app_router;
use buildtrack_api::state::AppState;
use buildtrack_db::store::Store;

pub const ADMIN_USERNAME: &str = "site-admin";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with a known signing secret and admin pair.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage: StorageBackend::Memory,
        database_url: None,
        jwt: JwtConfig {
            secret: Some("integration-test-secret-0123456789".to_string()),
            issuer: "buildtrack".to_string(),
            audience: "buildtrack-api".to_string(),
        },
        admin: AdminCredentials {
            username: Some(ADMIN_USERNAME.to_string()),
            password: Some(ADMIN_PASSWORD.to_string()),
        },
    }
}

/// Build the full application router over `store` with the test config.
///
/// Clones of an in-memory store share their tables, so a test can build a
/// fresh router per request and still observe earlier writes.
pub fn build_test_app(store: Store) -> Router {
    build_test_app_with(store, test_config())
}

pub fn build_test_app_with(store: Store, config: ServerConfig) -> Router {
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

pub fn admin_token() -> String {
    token_with_role("Admin")
}

pub fn token_with_role(role: &str) -> String {
    generate_access_token(ADMIN_USERNAME, role, &test_config().jwt).expect("token should sign")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(json)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    json: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(json)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    json: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(json)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Send a request with a raw `Authorization` header value.
pub async fn send_with_authorization(
    app: Router,
    method: Method,
    uri: &str,
    authorization: &str,
    json: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, authorization)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&json).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
