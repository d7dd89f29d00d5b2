//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hrsadmin_core::error::CoreError;
use hrsadmin_core::types::DbId;
use hrsadmin_db::repositories::{RoleRepo, UserRepo};

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// Beyond signature and expiry checks, extraction re-resolves the account in
/// the database on every request: a token held by a user who has since been
/// banned or deleted is rejected. Tokens themselves are stateless, so this
/// lookup is the only revocation point.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's email, from the resolved account row.
    pub email: String,
    /// The user's current role name (e.g. `"owner"`, `"admin"`, `"hr"`),
    /// resolved from the account rather than the token claims.
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        // Deleted or banned accounts are rejected with the same generic
        // message as a bad token.
        let user = UserRepo::find_by_id(&state.pool, claims.sub).await?;
        match user {
            Some(u) if !u.is_banned => {
                // The role comes from the account, not the token claims, so
                // a role change applies on the next request rather than at
                // token expiry.
                let role = RoleRepo::resolve_name(&state.pool, u.role_id).await?;
                Ok(AuthUser {
                    user_id: u.id,
                    email: u.email,
                    role,
                })
            }
            _ => Err(AppError::Core(CoreError::Unauthorized(
                "Invalid or expired token".into(),
            ))),
        }
    }
}
