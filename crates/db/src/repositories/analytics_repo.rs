//! Aggregate queries behind the `/analytics` endpoints.

use sqlx::PgPool;

use crate::models::analytics::{CategoryLanguageCount, CategoryUsage, OnlineCount, RoleCount};

/// Provides read-only aggregate queries over users and content items.
pub struct AnalyticsRepo;

impl AnalyticsRepo {
    /// Total number of accounts.
    pub async fn count_users(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Number of accounts currently flagged online.
    pub async fn count_online_users(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE is_online = true")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Number of content items in one category.
    pub async fn count_content_in_category(
        pool: &PgPool,
        category: &str,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM content_items WHERE category = $1")
            .bind(category)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Account counts grouped by role name.
    pub async fn users_by_role(pool: &PgPool) -> Result<Vec<RoleCount>, sqlx::Error> {
        sqlx::query_as::<_, RoleCount>(
            "SELECT r.name AS role, COUNT(u.id) AS count
             FROM users u JOIN roles r ON r.id = u.role_id
             GROUP BY r.name
             ORDER BY count DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Account counts grouped by online flag.
    pub async fn users_by_online(pool: &PgPool) -> Result<Vec<OnlineCount>, sqlx::Error> {
        sqlx::query_as::<_, OnlineCount>(
            "SELECT is_online, COUNT(*) AS count
             FROM users
             GROUP BY is_online
             ORDER BY is_online DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Content item counts grouped by (category, language).
    pub async fn content_by_category_language(
        pool: &PgPool,
    ) -> Result<Vec<CategoryLanguageCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryLanguageCount>(
            "SELECT category, language, COUNT(*) AS count
             FROM content_items
             GROUP BY category, language
             ORDER BY category, language",
        )
        .fetch_all(pool)
        .await
    }

    /// Total recorded usage grouped by category.
    pub async fn usage_by_category(pool: &PgPool) -> Result<Vec<CategoryUsage>, sqlx::Error> {
        sqlx::query_as::<_, CategoryUsage>(
            "SELECT category, COALESCE(SUM(usage_count), 0)::BIGINT AS total_usage
             FROM content_items
             GROUP BY category
             ORDER BY category",
        )
        .fetch_all(pool)
        .await
    }
}
