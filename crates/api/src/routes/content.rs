//! Route definitions for the `/content` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Routes mounted at `/content`.
///
/// ```text
/// POST   /            -> create_content (content producers)
/// GET    /scripts     -> list_scripts (?language=)
/// GET    /faq         -> list_faq (?language=)
/// GET    /questions   -> list_questions (?language=)
/// PUT    /{id}        -> update_content (owner-or-elevated)
/// DELETE /{id}        -> delete_content (owner-or-elevated)
/// POST   /{id}/use    -> record_usage
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(content::create_content))
        .route("/scripts", get(content::list_scripts))
        .route("/faq", get(content::list_faq))
        .route("/questions", get(content::list_questions))
        .route(
            "/{id}",
            put(content::update_content).delete(content::delete_content),
        )
        .route("/{id}/use", post(content::record_usage))
}
