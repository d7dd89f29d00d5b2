//! Handler for the `/online-users` REST view of the presence roster.

use axum::extract::State;
use axum::Json;
use hrsadmin_db::repositories::{RoleRepo, UserRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// One entry in the enriched roster.
#[derive(Debug, Serialize)]
pub struct OnlineUser {
    pub email: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
}

/// GET /api/v1/online-users
///
/// The current presence roster enriched with role and display names from
/// the database. Emails in the roster without a matching account (e.g. the
/// account was deleted mid-session) are listed with empty details.
pub async fn online_users(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<OnlineUser>>> {
    let roster = state.presence.roster().await;
    let accounts = UserRepo::list_by_emails(&state.pool, &roster).await?;
    let roles = RoleRepo::list(&state.pool).await?;

    let users = roster
        .into_iter()
        .map(|email| match accounts.iter().find(|u| u.email == email) {
            Some(u) => {
                let role = roles
                    .iter()
                    .find(|r| r.id == u.role_id)
                    .map(|r| r.name.clone())
                    .unwrap_or_else(|| "unknown".to_string());
                OnlineUser {
                    email,
                    role,
                    first_name: u.first_name.clone(),
                    last_name: u.last_name.clone(),
                }
            }
            None => OnlineUser {
                email,
                role: String::new(),
                first_name: String::new(),
                last_name: String::new(),
            },
        })
        .collect();

    Ok(Json(users))
}
