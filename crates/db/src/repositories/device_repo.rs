//! Repository for the `user_devices` table.

use hrsadmin_core::types::DbId;
use sqlx::PgPool;

use crate::models::device::UserDevice;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, device_id, mac, system_hash, added_at, last_active_at";

/// Provides read/remove operations for registered devices.
pub struct DeviceRepo;

impl DeviceRepo {
    /// List all devices registered to an account, most recently active first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserDevice>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_devices WHERE user_id = $1 ORDER BY last_active_at DESC"
        );
        sqlx::query_as::<_, UserDevice>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Remove one device by its client-assigned `device_id`.
    ///
    /// Returns `true` if a row was removed.
    pub async fn remove(
        pool: &PgPool,
        user_id: DbId,
        device_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM user_devices WHERE user_id = $1 AND device_id = $2")
                .bind(user_id)
                .bind(device_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
