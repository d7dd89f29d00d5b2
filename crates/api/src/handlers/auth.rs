//! Handlers for the `/auth` resource (login, setup-admin, verify, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use hrsadmin_core::error::CoreError;
use hrsadmin_core::roles::ROLE_OWNER;
use hrsadmin_db::models::user::{CreateUser, UserResponse};
use hrsadmin_db::repositories::{RoleRepo, UserRepo};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::handlers::user_to_response;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
///
/// Fields are optional so missing input is reported as a validation error
/// rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /auth/setup-admin`.
#[derive(Debug, Deserialize)]
pub struct SetupAdminRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Successful authentication response returned by login and setup-admin.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Response body for `GET /auth/verify`.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Unknown email, wrong password, and a
/// banned account all produce the same generic 401 so the endpoint leaks
/// nothing about which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (email, password) = match (input.email, input.password) {
        (Some(e), Some(p)) if !e.trim().is_empty() && !p.is_empty() => (e, p),
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "Email and password are required".into(),
            )))
        }
    };

    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid)?;

    if user.is_banned {
        return Err(invalid());
    }

    let password_valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid());
    }

    UserRepo::set_online(&state.pool, user.id, true).await?;

    let role_name = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    let token = generate_token(user.id, &user.email, &role_name, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    // Re-read so the response carries the fresh online flag.
    let user = UserRepo::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(invalid)?;
    let user = user_to_response(&state, &user).await?;

    Ok(Json(AuthResponse { token, user }))
}

/// POST /api/v1/auth/setup-admin
///
/// First-run bootstrap: create the owner account. Rejected once any owner
/// exists, so the endpoint is inert on a provisioned system.
pub async fn setup_admin(
    State(state): State<AppState>,
    Json(input): Json<SetupAdminRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    if input.email.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Email is required".into(),
        )));
    }
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let owner_role = RoleRepo::find_by_name(&state.pool, ROLE_OWNER)
        .await?
        .ok_or_else(|| AppError::InternalError("Owner role is not seeded".into()))?;

    if UserRepo::any_with_role(&state.pool, owner_role.id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "An owner account already exists".into(),
        )));
    }

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
        role_id: owner_role.id,
        first_name: input.first_name,
        last_name: input.last_name,
    };
    let user = UserRepo::create(&state.pool, &create_dto).await?;

    let token = generate_token(user.id, &user.email, ROLE_OWNER, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let user = user_to_response(&state, &user).await?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

/// GET /api/v1/auth/verify
///
/// Confirm the bearer token still maps to a live account and return its
/// current profile. The [`AuthUser`] extractor does all the gating.
pub async fn verify(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<VerifyResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

    let user = user_to_response(&state, &user).await?;
    Ok(Json(VerifyResponse { user }))
}

/// POST /api/v1/auth/logout
///
/// Clear the online flag. Tokens are stateless so the token itself stays
/// valid until expiry; this only updates presence bookkeeping.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    UserRepo::set_online(&state.pool, auth_user.user_id, false).await?;
    Ok(Json(json!({ "message": "Logged out" })))
}
