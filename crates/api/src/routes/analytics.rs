//! Route definitions for the `/analytics` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

/// Routes mounted at `/analytics`. All require an elevated role.
///
/// ```text
/// GET /dashboard  -> dashboard
/// GET /users      -> user_stats
/// GET /content    -> content_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(analytics::dashboard))
        .route("/users", get(analytics::user_stats))
        .route("/content", get(analytics::content_stats))
}
