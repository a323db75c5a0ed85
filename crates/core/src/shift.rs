//! Shift assignment rules: status and assignment-type vocabularies, the
//! respond-action state machine, and the validation helpers used by both
//! the DB and API layers.
//!
//! The actual writes are conditional at the storage layer (see
//! `crewline-db`); this module only decides which transition a request is
//! asking for and whether the caller is allowed to ask for it.

use crate::error::CoreError;
use crate::model::Shift;
use crate::types::DbId;

/* --------------------------------------------------------------------------
Status constants
-------------------------------------------------------------------------- */

/// Unassigned; claimable when the assignment type is `publishing`.
pub const SHIFT_STATUS_OPEN: &str = "open";

/// Offered to a specific staff member; awaiting their response.
pub const SHIFT_STATUS_PENDING: &str = "pending";

/// Assigned and confirmed; the only status that allows clocking in.
pub const SHIFT_STATUS_CONFIRMED: &str = "confirmed";

/// Declined by the offeree (kept in the vocabulary for admin overrides;
/// the respond path reopens shifts instead of parking them here).
pub const SHIFT_STATUS_REJECTED: &str = "rejected";

/// Worked and closed out. Reached only through the admin override path.
pub const SHIFT_STATUS_COMPLETED: &str = "completed";

/// All valid shift status values.
pub const VALID_SHIFT_STATUSES: &[&str] = &[
    SHIFT_STATUS_OPEN,
    SHIFT_STATUS_PENDING,
    SHIFT_STATUS_CONFIRMED,
    SHIFT_STATUS_REJECTED,
    SHIFT_STATUS_COMPLETED,
];

/* --------------------------------------------------------------------------
Assignment types
-------------------------------------------------------------------------- */

/// Direct assignment; a staffed shift is confirmed immediately.
pub const ASSIGNMENT_AUTOCONFIRM: &str = "autoconfirm";

/// Offer-and-reply; a staffed shift waits in `pending` until accepted.
pub const ASSIGNMENT_SEEKREPLY: &str = "seekreply";

/// Published to the pool; any staff member may claim it first-come.
pub const ASSIGNMENT_PUBLISHING: &str = "publishing";

/// All valid assignment type values. Fixed at shift creation.
pub const VALID_ASSIGNMENT_TYPES: &[&str] = &[
    ASSIGNMENT_AUTOCONFIRM,
    ASSIGNMENT_SEEKREPLY,
    ASSIGNMENT_PUBLISHING,
];

/* --------------------------------------------------------------------------
Respond actions
-------------------------------------------------------------------------- */

/// A staff member's response to a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespondAction {
    Accept,
    Reject,
    Claim,
}

/// Parse a respond action, rejecting unknown values before any state is
/// touched.
pub fn parse_respond_action(action: &str) -> Result<RespondAction, CoreError> {
    match action {
        "accept" => Ok(RespondAction::Accept),
        "reject" => Ok(RespondAction::Reject),
        "claim" => Ok(RespondAction::Claim),
        other => Err(CoreError::Validation(format!(
            "Invalid action '{other}'. Must be accept, reject, or claim"
        ))),
    }
}

/* --------------------------------------------------------------------------
Validation and transition rules
-------------------------------------------------------------------------- */

/// Validate the caller-supplied fields of a new shift.
pub fn validate_new_shift(role: &str, assignment_type: &str) -> Result<(), CoreError> {
    if role.trim().is_empty() {
        return Err(CoreError::Validation("Role is required".into()));
    }
    validate_assignment_type(assignment_type)
}

/// Validate that an assignment type string is one of the accepted values.
pub fn validate_assignment_type(assignment_type: &str) -> Result<(), CoreError> {
    if VALID_ASSIGNMENT_TYPES.contains(&assignment_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid assignment type '{assignment_type}'. Must be one of: {}",
            VALID_ASSIGNMENT_TYPES.join(", ")
        )))
    }
}

/// Validate that a shift status string is one of the accepted values.
pub fn validate_shift_status(status: &str) -> Result<(), CoreError> {
    if VALID_SHIFT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid shift status '{status}'. Must be one of: {}",
            VALID_SHIFT_STATUSES.join(", ")
        )))
    }
}

/// Status a newly created shift starts in.
///
/// A staffed shift is confirmed outright under `autoconfirm` and pending
/// otherwise; an unstaffed shift is always open regardless of type.
pub fn initial_status(assignment_type: &str, has_staff: bool) -> &'static str {
    if !has_staff {
        return SHIFT_STATUS_OPEN;
    }
    if assignment_type == ASSIGNMENT_AUTOCONFIRM {
        SHIFT_STATUS_CONFIRMED
    } else {
        SHIFT_STATUS_PENDING
    }
}

/// Check that a shift may be claimed by anyone at all.
///
/// Claiming is only meaningful for `publishing` shifts; the "is it still
/// open" half of the rule is enforced atomically by the storage write.
pub fn ensure_claimable(shift: &Shift) -> Result<(), CoreError> {
    if shift.assignment_type != ASSIGNMENT_PUBLISHING {
        return Err(CoreError::InvalidState(
            "This shift is not available for claiming".into(),
        ));
    }
    Ok(())
}

/// Check that an accept comes from the staff member the shift was offered to.
pub fn ensure_accept_allowed(shift: &Shift, acting_user: DbId) -> Result<(), CoreError> {
    if shift.staff_id != Some(acting_user) {
        return Err(CoreError::Forbidden(
            "This shift was not offered to you".into(),
        ));
    }
    Ok(())
}

/// The staffing invariant: pending and confirmed shifts always carry a
/// staff member.
pub fn staffing_invariant_holds(status: &str, staff_id: Option<DbId>) -> bool {
    match status {
        SHIFT_STATUS_PENDING | SHIFT_STATUS_CONFIRMED => staff_id.is_some(),
        _ => true,
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
