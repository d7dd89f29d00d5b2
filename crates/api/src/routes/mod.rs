pub mod analytics;
pub mod auth;
pub mod content;
pub mod health;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                WebSocket presence channel (?email=)
///
/// /online-users                      enriched presence roster (requires auth)
///
/// /auth/login                        login (public)
/// /auth/setup-admin                  first-run owner bootstrap (public)
/// /auth/verify                       token check (requires auth)
/// /auth/logout                       logout (requires auth)
///
/// /users                             list (auth), create (owner only)
/// /users/me                          update own profile
/// /users/me/password                 change own password
/// /users/{id}                        get (auth), update, delete (owner only)
/// /users/{id}/devices                list devices (auth)
/// /users/{id}/devices/{device_id}    remove device (auth)
///
/// /content                           create (content producers)
/// /content/scripts                   list scripts (?language=)
/// /content/faq                       list FAQ entries (?language=)
/// /content/questions                 list questions (?language=)
/// /content/{id}                      update, delete (owner-or-elevated)
/// /content/{id}/use                  record usage (POST)
///
/// /analytics/dashboard               headline counts (elevated only)
/// /analytics/users                   account stats (elevated only)
/// /analytics/content                 content stats (elevated only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket presence endpoint.
        .route("/ws", get(ws::ws_handler))
        // REST view of the presence roster.
        .route("/online-users", get(handlers::presence::online_users))
        // Authentication routes (login, setup-admin, verify, logout).
        .nest("/auth", auth::router())
        // Account management, profile, and devices.
        .nest("/users", users::router())
        // Content items (scripts, FAQ, questions).
        .nest("/content", content::router())
        // Aggregate dashboards.
        .nest("/analytics", analytics::router())
}
