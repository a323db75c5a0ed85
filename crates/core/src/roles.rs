//! Role vocabulary carried in access-token claims.

/// Operations staff who create events and shifts.
pub const ROLE_ADMIN: &str = "admin";

/// Workers who take shifts and clock time.
pub const ROLE_STAFF: &str = "staff";
