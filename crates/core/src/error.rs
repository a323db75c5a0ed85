use crate::types::DbId;

/// Domain error taxonomy.
///
/// Every business-rule violation is detected before any mutation and mapped
/// to exactly one of these variants. The HTTP layer decides status codes;
/// the message text is free-form.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The operation is not valid given the entity's current state
    /// (e.g. claiming a non-publishing shift, clocking in to an
    /// unconfirmed shift, clocking out while not clocked in).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A concurrent-mutation race was lost (double claim, double clock-in).
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
