use std::sync::Arc;

use buildtrack_db::store::Store;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Entity store (PostgreSQL or in-memory).
    pub store: Store,
    /// Server configuration, including token and admin credential settings.
    pub config: Arc<ServerConfig>,
}
