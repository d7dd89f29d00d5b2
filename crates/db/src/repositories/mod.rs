//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod analytics_repo;
pub mod content_repo;
pub mod device_repo;
pub mod role_repo;
pub mod user_repo;

pub use analytics_repo::AnalyticsRepo;
pub use content_repo::ContentRepo;
pub use device_repo::DeviceRepo;
pub use role_repo::RoleRepo;
pub use user_repo::UserRepo;
