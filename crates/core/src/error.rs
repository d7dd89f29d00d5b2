//! Domain error taxonomy shared by the db and api crates.
//!
//! The api crate maps these onto HTTP statuses: Validation and Conflict to
//! 400, Unauthorized to 401, Forbidden to 403, NotFound to 404, Internal
//! to 500.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Missing or malformed input detected at the request boundary.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// State conflict, e.g. a duplicate account email.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing, invalid, or expired credentials / bearer token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but outside the endpoint's role allow-list.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
