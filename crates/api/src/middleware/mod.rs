//! Request-level middleware and extractors.

pub mod auth;
pub mod rbac;
