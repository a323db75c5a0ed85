//! Event status vocabulary and validation helpers.

use crate::error::CoreError;

/// Event is being drafted and is not visible to staff.
pub const EVENT_STATUS_DRAFT: &str = "draft";

/// Event is published and its shifts can be offered/claimed.
pub const EVENT_STATUS_PUBLISHED: &str = "published";

/// Event has taken place.
pub const EVENT_STATUS_COMPLETED: &str = "completed";

/// Event was cancelled at the event level.
pub const EVENT_STATUS_CANCELLED: &str = "cancelled";

/// All valid event status values.
pub const VALID_EVENT_STATUSES: &[&str] = &[
    EVENT_STATUS_DRAFT,
    EVENT_STATUS_PUBLISHED,
    EVENT_STATUS_COMPLETED,
    EVENT_STATUS_CANCELLED,
];

/// Validate that an event status string is one of the accepted values.
pub fn validate_event_status(status: &str) -> Result<(), CoreError> {
    if VALID_EVENT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid event status '{status}'. Must be one of: {}",
            VALID_EVENT_STATUSES.join(", ")
        )))
    }
}

/// Validate the required text fields of a new event.
pub fn validate_event_fields(
    title: &str,
    venue: &str,
    start_time: &str,
    end_time: &str,
) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title is required".into()));
    }
    if venue.trim().is_empty() {
        return Err(CoreError::Validation("Venue is required".into()));
    }
    if start_time.trim().is_empty() {
        return Err(CoreError::Validation("Start time is required".into()));
    }
    if end_time.trim().is_empty() {
        return Err(CoreError::Validation("End time is required".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_event_statuses_accepted() {
        for status in VALID_EVENT_STATUSES {
            assert!(validate_event_status(status).is_ok());
        }
    }

    #[test]
    fn test_invalid_event_status_rejected() {
        assert!(validate_event_status("archived").is_err());
        assert!(validate_event_status("").is_err());
    }

    #[test]
    fn test_event_fields_required() {
        assert!(validate_event_fields("Gala", "Hall A", "18:00", "23:00").is_ok());
        assert!(validate_event_fields("", "Hall A", "18:00", "23:00").is_err());
        assert!(validate_event_fields("Gala", "  ", "18:00", "23:00").is_err());
        assert!(validate_event_fields("Gala", "Hall A", "", "23:00").is_err());
        assert!(validate_event_fields("Gala", "Hall A", "18:00", "").is_err());
    }
}
