//! Handlers for the `/content` resource (scripts, FAQ entries, questions).
//!
//! Creation requires a content-producing role. Listings apply ownership
//! scoping: elevated roles see everything, everyone else sees only their
//! own items. Edits and deletes re-check ownership against the current
//! item, never against what the client claims.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hrsadmin_core::content::{Category, Language};
use hrsadmin_core::error::CoreError;
use hrsadmin_core::roles::is_elevated;
use hrsadmin_core::types::DbId;
use hrsadmin_db::models::content::{ContentItem, CreateContentItem, UpdateContentItem};
use hrsadmin_db::repositories::ContentRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireContentProducer;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /content`.
#[derive(Debug, Deserialize)]
pub struct CreateContentRequest {
    pub name: String,
    #[serde(default)]
    pub content: String,
    pub category: Option<Category>,
    pub language: Option<Language>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request body for `PUT /content/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateContentRequest {
    pub name: Option<String>,
    pub content: Option<String>,
    pub language: Option<Language>,
    pub tags: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

/// Query parameters for category listings.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub language: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/content
///
/// Create a content item owned by the caller. Category defaults to `script`
/// and language to `en`.
pub async fn create_content(
    State(state): State<AppState>,
    RequireContentProducer(user): RequireContentProducer,
    Json(input): Json<CreateContentRequest>,
) -> AppResult<(StatusCode, Json<ContentItem>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Content name is required".into(),
        )));
    }

    let category = input.category.unwrap_or(Category::Script);
    let language = input.language.unwrap_or(Language::En);

    let create_dto = CreateContentItem {
        name: input.name,
        content: input.content,
        category: category.as_str().to_string(),
        language: language.as_str().to_string(),
        tags: input.tags,
        owner_id: user.user_id,
    };
    let item = ContentRepo::create(&state.pool, &create_dto).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/v1/content/scripts
pub async fn list_scripts(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<ContentItem>>> {
    list_category(&state, &user, Category::Script, params).await
}

/// GET /api/v1/content/faq
pub async fn list_faq(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<ContentItem>>> {
    list_category(&state, &user, Category::Faq, params).await
}

/// GET /api/v1/content/questions
pub async fn list_questions(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<ContentItem>>> {
    list_category(&state, &user, Category::Question, params).await
}

/// PUT /api/v1/content/{id}
///
/// Update a content item. Only the owner or an elevated role may edit.
pub async fn update_content(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContentRequest>,
) -> AppResult<Json<ContentItem>> {
    let item = ContentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Content item",
            id,
        }))?;

    check_item_access(&user, &item)?;

    // An update may omit the name, but cannot blank it.
    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Content name is required".into(),
            )));
        }
    }

    let update_dto = UpdateContentItem {
        name: input.name,
        content: input.content,
        language: input.language.map(|l| l.as_str().to_string()),
        tags: input.tags,
        is_active: input.is_active,
    };

    let item = ContentRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Content item",
            id,
        }))?;

    Ok(Json(item))
}

/// DELETE /api/v1/content/{id}
///
/// Delete a content item. Only the owner or an elevated role may delete.
/// Returns 204 No Content.
pub async fn delete_content(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let item = ContentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Content item",
            id,
        }))?;

    check_item_access(&user, &item)?;

    ContentRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/content/{id}/use
///
/// Record one use of a content item (increments the counter and stamps
/// `last_used_at`). Returns 204 No Content.
pub async fn record_usage(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let item = ContentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Content item",
            id,
        }))?;

    check_item_access(&user, &item)?;

    ContentRepo::record_usage(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Shared listing logic: parse the optional language filter and apply
/// ownership scoping based on the caller's role.
async fn list_category(
    state: &AppState,
    user: &AuthUser,
    category: Category,
    params: ListParams,
) -> AppResult<Json<Vec<ContentItem>>> {
    let language = match params.language.as_deref() {
        Some(raw) => Some(Language::parse(raw).map_err(AppError::Core)?),
        None => None,
    };

    let owner_scope = if is_elevated(&user.role) {
        None
    } else {
        Some(user.user_id)
    };

    let items = ContentRepo::list_by_category(
        &state.pool,
        category.as_str(),
        language.map(|l| l.as_str()),
        owner_scope,
    )
    .await?;

    Ok(Json(items))
}

/// Owner-or-elevated access check, evaluated against the stored item.
fn check_item_access(user: &AuthUser, item: &ContentItem) -> Result<(), AppError> {
    if is_elevated(&user.role) || item.owner_id == user.user_id {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden("Access denied".into())))
    }
}
