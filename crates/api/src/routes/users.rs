//! Route definitions for the `/users` resource.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                          -> list_users (auth)
/// POST   /                          -> create_user (owner only)
/// PUT    /me                        -> update_me
/// PUT    /me/password               -> change_password
/// GET    /{id}                      -> get_user (auth)
/// PUT    /{id}                      -> update_user (owner only)
/// DELETE /{id}                      -> delete_user (owner only)
/// GET    /{id}/devices              -> list_devices (auth)
/// DELETE /{id}/devices/{device_id}  -> remove_device (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        // `/me` before `/{id}` so the literal segment wins.
        .route("/me", put(users::update_me))
        .route("/me/password", put(users::change_password))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/{id}/devices", get(users::list_devices))
        .route("/{id}/devices/{device_id}", delete(users::remove_device))
}
