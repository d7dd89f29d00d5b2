//! Row types for the analytics aggregate queries.

use serde::Serialize;
use sqlx::FromRow;

/// User count per role name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoleCount {
    pub role: String,
    pub count: i64,
}

/// User count per online flag.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OnlineCount {
    pub is_online: bool,
    pub count: i64,
}

/// Content item count per (category, language) pair.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryLanguageCount {
    pub category: String,
    pub language: String,
    pub count: i64,
}

/// Total recorded usage per content category.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryUsage {
    pub category: String,
    pub total_usage: i64,
}
