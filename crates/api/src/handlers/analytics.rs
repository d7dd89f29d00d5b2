//! Handlers for the `/analytics` resource (aggregate dashboards).
//!
//! All endpoints require an elevated role via [`RequireElevated`].

use axum::extract::State;
use axum::Json;
use hrsadmin_core::content::Category;
use hrsadmin_db::models::analytics::{
    CategoryLanguageCount, CategoryUsage, OnlineCount, RoleCount,
};
use hrsadmin_db::models::user::UserResponse;
use hrsadmin_db::repositories::{AnalyticsRepo, UserRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::users_to_responses;
use crate::middleware::rbac::RequireElevated;
use crate::state::AppState;

/// How many recently created accounts the dashboard shows.
const RECENT_USERS_LIMIT: i64 = 5;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response body for `GET /analytics/dashboard`.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_users: i64,
    pub online_users: i64,
    pub total_scripts: i64,
    pub total_faqs: i64,
    pub total_questions: i64,
    pub recent_users: Vec<UserResponse>,
}

/// Response body for `GET /analytics/users`.
#[derive(Debug, Serialize)]
pub struct UserStatsResponse {
    pub by_role: Vec<RoleCount>,
    pub by_status: Vec<OnlineCount>,
}

/// Response body for `GET /analytics/content`.
#[derive(Debug, Serialize)]
pub struct ContentStatsResponse {
    pub by_category_and_language: Vec<CategoryLanguageCount>,
    pub usage_by_category: Vec<CategoryUsage>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/analytics/dashboard
///
/// Headline counts plus the most recently created accounts.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireElevated(_user): RequireElevated,
) -> AppResult<Json<DashboardResponse>> {
    let total_users = AnalyticsRepo::count_users(&state.pool).await?;
    let online_users = AnalyticsRepo::count_online_users(&state.pool).await?;
    let total_scripts =
        AnalyticsRepo::count_content_in_category(&state.pool, Category::Script.as_str()).await?;
    let total_faqs =
        AnalyticsRepo::count_content_in_category(&state.pool, Category::Faq.as_str()).await?;
    let total_questions =
        AnalyticsRepo::count_content_in_category(&state.pool, Category::Question.as_str()).await?;

    let recent = UserRepo::recent(&state.pool, RECENT_USERS_LIMIT).await?;
    let recent_users = users_to_responses(&state, &recent).await?;

    Ok(Json(DashboardResponse {
        total_users,
        online_users,
        total_scripts,
        total_faqs,
        total_questions,
        recent_users,
    }))
}

/// GET /api/v1/analytics/users
///
/// Account counts grouped by role and by online status.
pub async fn user_stats(
    State(state): State<AppState>,
    RequireElevated(_user): RequireElevated,
) -> AppResult<Json<UserStatsResponse>> {
    let by_role = AnalyticsRepo::users_by_role(&state.pool).await?;
    let by_status = AnalyticsRepo::users_by_online(&state.pool).await?;

    Ok(Json(UserStatsResponse { by_role, by_status }))
}

/// GET /api/v1/analytics/content
///
/// Content item counts by (category, language) and usage totals by category.
pub async fn content_stats(
    State(state): State<AppState>,
    RequireElevated(_user): RequireElevated,
) -> AppResult<Json<ContentStatsResponse>> {
    let by_category_and_language =
        AnalyticsRepo::content_by_category_language(&state.pool).await?;
    let usage_by_category = AnalyticsRepo::usage_by_category(&state.pool).await?;

    Ok(Json(ContentStatsResponse {
        by_category_and_language,
        usage_by_category,
    }))
}
