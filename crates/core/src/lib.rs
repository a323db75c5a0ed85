//! Domain layer for the Crewline staffing backend.
//!
//! Holds the entity types, the error taxonomy, the pure business rules for
//! shift assignment and time tracking, and the [`store::Store`] trait that
//! the persistence implementations in `crewline-db` fulfil. Nothing in this
//! crate performs I/O.

pub mod error;
pub mod event;
pub mod message;
pub mod model;
pub mod notify;
pub mod review;
pub mod roles;
pub mod shift;
pub mod store;
pub mod timeclock;
pub mod types;
