//! Domain core for the HRS-Admin backend.
//!
//! Holds the shared primitives the `db` and `api` crates build on: ID and
//! timestamp aliases, the error taxonomy, role constants, and the content
//! category/language enumerations.

pub mod content;
pub mod error;
pub mod roles;
pub mod types;
