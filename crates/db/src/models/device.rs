//! Registered device model.
//!
//! Devices are recorded per account by the desktop client; the API only
//! lists and removes them.

use hrsadmin_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A device row from the `user_devices` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserDevice {
    pub id: DbId,
    pub user_id: DbId,
    pub device_id: String,
    pub mac: Option<String>,
    pub system_hash: Option<String>,
    pub added_at: Timestamp,
    pub last_active_at: Timestamp,
}
