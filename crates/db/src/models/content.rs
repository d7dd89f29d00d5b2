//! Content item entity model and DTOs.
//!
//! Scripts, FAQ entries, and support questions share one table with a
//! `category` discriminator.

use hrsadmin_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A content item row joined with its owner's email.
///
/// All repository SELECTs join `users` so responses can carry the owner
/// identity without a second round-trip.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentItem {
    pub id: DbId,
    pub name: String,
    pub content: String,
    /// One of `script`, `faq`, `question` (CHECK-constrained).
    pub category: String,
    /// One of `en`, `ua`, `ru` (CHECK-constrained).
    pub language: String,
    pub tags: Vec<String>,
    pub owner_id: DbId,
    pub owner_email: String,
    pub is_active: bool,
    pub usage_count: i64,
    pub last_used_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a content item.
#[derive(Debug)]
pub struct CreateContentItem {
    pub name: String,
    pub content: String,
    pub category: String,
    pub language: String,
    pub tags: Vec<String>,
    pub owner_id: DbId,
}

/// DTO for updating a content item. All fields are optional.
#[derive(Debug, Default)]
pub struct UpdateContentItem {
    pub name: Option<String>,
    pub content: Option<String>,
    pub language: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_active: Option<bool>,
}
