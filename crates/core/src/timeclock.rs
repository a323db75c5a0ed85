//! Time tracking rules: clock-in eligibility and elapsed-minute arithmetic.

use crate::error::CoreError;
use crate::model::Shift;
use crate::shift::SHIFT_STATUS_CONFIRMED;
use crate::types::{DbId, Timestamp};

/// An entry that is currently running.
pub const ENTRY_STATUS_ACTIVE: &str = "active";

/// An entry that has been finalized by a clock-out.
pub const ENTRY_STATUS_COMPLETED: &str = "completed";

/// Check that a staff member may clock in to the given shift.
///
/// The shift must be assigned to the caller and confirmed. The
/// one-active-entry-per-staff rule is enforced separately by the storage
/// layer so that two concurrent clock-ins cannot both pass a read check.
pub fn ensure_clock_in_allowed(shift: &Shift, staff_id: DbId) -> Result<(), CoreError> {
    if shift.staff_id != Some(staff_id) {
        return Err(CoreError::Forbidden(
            "This shift is not assigned to you".into(),
        ));
    }
    if shift.status != SHIFT_STATUS_CONFIRMED {
        return Err(CoreError::InvalidState(
            "Shift must be confirmed to clock in".into(),
        ));
    }
    Ok(())
}

/// Whole minutes between clock-in and clock-out, floored.
///
/// Both stamps come from the server's own clock, so clock_in <= clock_out
/// is an invariant; the clamp to zero guards against it being violated by
/// a bug rather than treating skew as a recoverable case.
pub fn elapsed_minutes(clock_in: Timestamp, clock_out: Timestamp) -> i32 {
    let minutes = (clock_out - clock_in).num_minutes();
    i32::try_from(minutes.max(0)).unwrap_or(i32::MAX)
}
