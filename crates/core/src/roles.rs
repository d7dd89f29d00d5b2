//! Well-known role name constants and allow-list predicates.
//!
//! These must match the seed data in `20260301000001_create_roles_table.sql`.

pub const ROLE_OWNER: &str = "owner";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_HR: &str = "hr";
pub const ROLE_TEAMLEAD: &str = "teamlead";
pub const ROLE_TRAINEE: &str = "trainee";

/// Elevated roles see and mutate records regardless of ownership.
pub fn is_elevated(role: &str) -> bool {
    role == ROLE_OWNER || role == ROLE_ADMIN
}

/// Roles allowed to create content items (scripts, FAQ entries, questions).
pub fn can_author_content(role: &str) -> bool {
    role == ROLE_OWNER || role == ROLE_ADMIN || role == ROLE_HR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elevated_roles_are_owner_and_admin() {
        assert!(is_elevated(ROLE_OWNER));
        assert!(is_elevated(ROLE_ADMIN));
        assert!(!is_elevated(ROLE_HR));
        assert!(!is_elevated(ROLE_TEAMLEAD));
        assert!(!is_elevated(ROLE_TRAINEE));
    }

    #[test]
    fn content_authors_include_hr() {
        assert!(can_author_content(ROLE_HR));
        assert!(!can_author_content(ROLE_TEAMLEAD));
        assert!(!can_author_content(ROLE_TRAINEE));
    }
}
