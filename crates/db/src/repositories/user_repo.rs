//! Repository for the `users` table.

use hrsadmin_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, role_id, first_name, last_name, \
                        is_banned, is_online, last_seen_at, created_at, updated_at";

/// Provides CRUD operations for accounts.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new account, returning the created row.
    ///
    /// The email is lowercased on insert; duplicates violate
    /// `uq_users_email` (surfaced as a unique-violation database error).
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, role_id, first_name, last_name)
             VALUES (LOWER($1), $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.role_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_one(pool)
            .await
    }

    /// Find an account by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by email (matched lowercased).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all accounts ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// List the `limit` most recently created accounts.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC LIMIT $1");
        sqlx::query_as::<_, User>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// List accounts whose email is in `emails`, ordered by email.
    ///
    /// Used to enrich the presence roster with role and display names.
    pub async fn list_by_emails(pool: &PgPool, emails: &[String]) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = ANY($1) ORDER BY email");
        sqlx::query_as::<_, User>(&query)
            .bind(emails)
            .fetch_all(pool)
            .await
    }

    /// Apply an admin edit. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                role_id = COALESCE($2, role_id),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                is_banned = COALESCE($5, is_banned),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(input.role_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.is_banned)
            .fetch_optional(pool)
            .await
    }

    /// Update an account's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the online flag and stamp `last_seen_at`.
    ///
    /// Called on login (`true`) and logout (`false`).
    pub async fn set_online(pool: &PgPool, id: DbId, online: bool) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET is_online = $2, last_seen_at = NOW(), updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(online)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Hard-delete an account. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether any account with the given role exists.
    ///
    /// Used by the first-run owner bootstrap.
    pub async fn any_with_role(pool: &PgPool, role_id: DbId) -> Result<bool, sqlx::Error> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE role_id = $1)")
                .bind(role_id)
                .fetch_one(pool)
                .await?;
        Ok(exists.0)
    }
}
