//! Handlers for the `/users` resource (account management, profile, devices).
//!
//! Listing and device endpoints require any authenticated user; account
//! creation, admin edits, and deletion require the `owner` role via
//! [`RequireOwner`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hrsadmin_core::error::CoreError;
use hrsadmin_core::types::DbId;
use hrsadmin_db::models::device::UserDevice;
use hrsadmin_db::models::user::{CreateUser, UpdateUser, UserResponse};
use hrsadmin_db::repositories::{DeviceRepo, RoleRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::handlers::{user_to_response, users_to_responses};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireOwner;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub password: String,
    /// Role name (e.g. `"hr"`, `"trainee"`).
    pub role: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Request body for `PUT /users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    /// New role name, if changing.
    pub role: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_banned: Option<bool>,
}

/// Request body for `PUT /users/me`.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Request body for `PUT /users/me/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/users
///
/// List all accounts with resolved role names.
pub async fn list_users(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    let responses = users_to_responses(&state, &users).await?;
    Ok(Json(responses))
}

/// POST /api/v1/users
///
/// Create a new account. Validates the email and password, resolves the role
/// by name, hashes the password, and returns 201 Created.
pub async fn create_user(
    State(state): State<AppState>,
    RequireOwner(_owner): RequireOwner,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let role = RoleRepo::find_by_name(&state.pool, &input.role)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Unknown role: {}",
                input.role
            )))
        })?;

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email already exists".into(),
        )));
    }

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        email: input.email,
        password_hash: hashed,
        role_id: role.id,
        first_name: input.first_name,
        last_name: input.last_name,
    };
    let user = UserRepo::create(&state.pool, &create_dto).await?;
    let response = user_to_response(&state, &user).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/users/{id}
///
/// Get a single account by ID.
pub async fn get_user(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let response = user_to_response(&state, &user).await?;
    Ok(Json(response))
}

/// PUT /api/v1/users/{id}
///
/// Admin edit of an account: role, names, ban flag (not password).
pub async fn update_user(
    State(state): State<AppState>,
    RequireOwner(_owner): RequireOwner,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let role_id = match &input.role {
        Some(name) => Some(
            RoleRepo::find_by_name(&state.pool, name)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Validation(format!("Unknown role: {name}")))
                })?
                .id,
        ),
        None => None,
    };

    let update_dto = UpdateUser {
        role_id,
        first_name: input.first_name,
        last_name: input.last_name,
        is_banned: input.is_banned,
    };

    let user = UserRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let response = user_to_response(&state, &user).await?;
    Ok(Json(response))
}

/// DELETE /api/v1/users/{id}
///
/// Hard-delete an account. Self-deletion is rejected so the owner cannot
/// lock themselves out. Returns 204 No Content.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireOwner(owner): RequireOwner,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == owner.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot delete your own account".into(),
        )));
    }

    let deleted = UserRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}

/// PUT /api/v1/users/me
///
/// Update the caller's own display names.
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let update_dto = UpdateUser {
        first_name: input.first_name,
        last_name: input.last_name,
        ..Default::default()
    };

    let user = UserRepo::update(&state.pool, auth_user.user_id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;

    let response = user_to_response(&state, &user).await?;
    Ok(Json(response))
}

/// PUT /api/v1/users/me/password
///
/// Change the caller's password after verifying the current one.
/// Returns 204 No Content.
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;

    let current_valid = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Validation(
            "Current password is incorrect".into(),
        )));
    }

    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &hashed).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/users/{id}/devices
///
/// List devices registered to an account.
pub async fn list_devices(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<UserDevice>>> {
    // 404 for a missing account rather than an empty device list.
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let devices = DeviceRepo::list_for_user(&state.pool, id).await?;
    Ok(Json(devices))
}

/// DELETE /api/v1/users/{id}/devices/{device_id}
///
/// Remove one registered device. Returns 204 No Content.
pub async fn remove_device(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((id, device_id)): Path<(DbId, String)>,
) -> AppResult<StatusCode> {
    let removed = DeviceRepo::remove(&state.pool, id, &device_id).await?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Device",
            id,
        }))
    }
}
