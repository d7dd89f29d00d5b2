//! Account entity model and DTOs.

use hrsadmin_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full account row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub is_banned: bool,
    pub is_online: bool,
    pub last_seen_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe account representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    /// Resolved role name (e.g. `"owner"`, `"hr"`).
    pub role: String,
    pub role_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub is_banned: bool,
    pub is_online: bool,
    pub last_seen_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl UserResponse {
    /// Build the external-facing representation from a full row plus the
    /// resolved role name.
    pub fn from_user(user: &User, role: String) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role,
            role_id: user.role_id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_banned: user.is_banned,
            is_online: user.is_online,
            last_seen_at: user.last_seen_at,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new account. Email is stored lowercased.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub first_name: String,
    pub last_name: String,
}

/// DTO for admin edits of an account. All fields are optional.
#[derive(Debug, Default)]
pub struct UpdateUser {
    pub role_id: Option<DbId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_banned: Option<bool>,
}
