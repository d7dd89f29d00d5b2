//! HTTP request handlers, grouped by resource.

pub mod analytics;
pub mod auth;
pub mod content;
pub mod presence;
pub mod users;

use hrsadmin_db::models::user::{User, UserResponse};
use hrsadmin_db::repositories::RoleRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// Resolve the role name for one account and build its safe representation.
pub(crate) async fn user_to_response(state: &AppState, user: &User) -> AppResult<UserResponse> {
    let role_name = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(UserResponse::from_user(user, role_name))
}

/// Build safe representations for a batch of accounts.
///
/// Pre-fetches all roles once to avoid N+1 queries.
pub(crate) async fn users_to_responses(
    state: &AppState,
    users: &[User],
) -> AppResult<Vec<UserResponse>> {
    let roles = RoleRepo::list(&state.pool).await?;
    Ok(users
        .iter()
        .map(|u| {
            let role_name = roles
                .iter()
                .find(|r| r.id == u.role_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| "unknown".to_string());
            UserResponse::from_user(u, role_name)
        })
        .collect())
}
