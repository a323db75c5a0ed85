//! Authentication building blocks: JWT generation and validation.
//!
//! Token minting for real users happens outside this service; the helpers
//! here exist for validation and for the test suites.

pub mod jwt;
