//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the minimum requirement. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hrsadmin_core::error::CoreError;
use hrsadmin_core::roles::{can_author_content, is_elevated, ROLE_OWNER};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `owner` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn owner_only(RequireOwner(user): RequireOwner) -> AppResult<Json<()>> {
///     // user is guaranteed to be the owner here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireOwner(pub AuthUser);

impl FromRequestParts<AppState> for RequireOwner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_OWNER {
            return Err(AppError::Core(CoreError::Forbidden(
                "Owner role required".into(),
            )));
        }
        Ok(RequireOwner(user))
    }
}

/// Requires `owner` or `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn elevated_only(RequireElevated(user): RequireElevated) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireElevated(pub AuthUser);

impl FromRequestParts<AppState> for RequireElevated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_elevated(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Owner or Admin role required".into(),
            )));
        }
        Ok(RequireElevated(user))
    }
}

/// Requires a role allowed to author content (`owner`, `admin`, or `hr`).
/// Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn authors_only(RequireContentProducer(user): RequireContentProducer) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireContentProducer(pub AuthUser);

impl FromRequestParts<AppState> for RequireContentProducer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !can_author_content(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Owner, Admin, or HR role required".into(),
            )));
        }
        Ok(RequireContentProducer(user))
    }
}
