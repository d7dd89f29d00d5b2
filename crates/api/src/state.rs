use std::sync::Arc;

use crate::config::ServerConfig;
use crate::ws::PresenceRegistry;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: hrsadmin_db::DbPool,
    /// Server configuration (JWT secret, CORS, timeouts).
    pub config: Arc<ServerConfig>,
    /// In-memory presence registry backing the WebSocket roster.
    pub presence: Arc<PresenceRegistry>,
}
