//! Repository for the `content_items` table.

use hrsadmin_core::types::DbId;
use sqlx::PgPool;

use crate::models::content::{ContentItem, CreateContentItem, UpdateContentItem};

/// Column list shared across queries. Every SELECT joins `users` so the
/// owner email travels with the row.
const COLUMNS: &str = "c.id, c.name, c.content, c.category, c.language, c.tags, \
                        c.owner_id, u.email AS owner_email, c.is_active, c.usage_count, \
                        c.last_used_at, c.created_at, c.updated_at";

const FROM: &str = "content_items c JOIN users u ON u.id = c.owner_id";

/// Provides CRUD operations for content items.
pub struct ContentRepo;

impl ContentRepo {
    /// Insert a new content item, then re-read it with the owner join.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContentItem,
    ) -> Result<ContentItem, sqlx::Error> {
        let id: (DbId,) = sqlx::query_as(
            "INSERT INTO content_items (name, content, category, language, tags, owner_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.content)
        .bind(&input.category)
        .bind(&input.language)
        .bind(&input.tags)
        .bind(input.owner_id)
        .fetch_one(pool)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM {FROM} WHERE c.id = $1");
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(id.0)
            .fetch_one(pool)
            .await
    }

    /// Find a content item by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ContentItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {FROM} WHERE c.id = $1");
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List items in a category, newest first.
    ///
    /// `language` narrows the listing when given. `owner_id` applies
    /// ownership scoping: `Some(id)` restricts to that owner, `None`
    /// returns all items (elevated callers).
    pub async fn list_by_category(
        pool: &PgPool,
        category: &str,
        language: Option<&str>,
        owner_id: Option<DbId>,
    ) -> Result<Vec<ContentItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {FROM}
             WHERE c.category = $1
               AND ($2::TEXT IS NULL OR c.language = $2)
               AND ($3::BIGINT IS NULL OR c.owner_id = $3)
             ORDER BY c.created_at DESC"
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(category)
            .bind(language)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Update a content item. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateContentItem,
    ) -> Result<Option<ContentItem>, sqlx::Error> {
        let updated: Option<(DbId,)> = sqlx::query_as(
            "UPDATE content_items SET
                name = COALESCE($2, name),
                content = COALESCE($3, content),
                language = COALESCE($4, language),
                tags = COALESCE($5, tags),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.content)
        .bind(&input.language)
        .bind(&input.tags)
        .bind(input.is_active)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some((id,)) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Delete a content item. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM content_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increment the usage counter and stamp `last_used_at`.
    ///
    /// The counter only ever grows (it resets solely by deletion).
    /// Returns `true` if the row exists.
    pub async fn record_usage(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE content_items SET
                usage_count = usage_count + 1,
                last_used_at = NOW(),
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
