//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /login        -> login
/// POST /setup-admin  -> setup_admin (first-run bootstrap)
/// GET  /verify       -> verify (requires auth)
/// POST /logout       -> logout (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/setup-admin", post(auth::setup_admin))
        .route("/verify", get(auth::verify))
        .route("/logout", post(auth::logout))
}
