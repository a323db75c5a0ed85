//! Notification kinds and content builders.
//!
//! Every kind tags the operation that triggered the notification; the
//! titles and message texts are what the client renders in the bell menu.

use crate::model::NewNotification;
use crate::types::DbId;

/// A shift was offered to a specific staff member.
pub const KIND_SHIFT_OFFER: &str = "shift_offer";

/// An offered or published shift was accepted/claimed.
pub const KIND_SHIFT_ACCEPTED: &str = "shift_accepted";

/// An offered shift was declined.
pub const KIND_SHIFT_REJECTED: &str = "shift_rejected";

/// A direct message arrived.
pub const KIND_NEW_MESSAGE: &str = "new_message";

/// A performance review was left.
pub const KIND_NEW_REVIEW: &str = "new_review";

/// Longest message-content preview embedded in a notification.
const MESSAGE_PREVIEW_LEN: usize = 100;

/// Notification to the offeree when an admin creates a targeted shift.
pub fn shift_offer(staff_id: DbId, shift_id: DbId, role: &str) -> NewNotification {
    NewNotification {
        user_id: staff_id,
        kind: KIND_SHIFT_OFFER.into(),
        title: "New Shift Offer".into(),
        message: format!("You've been offered a {role} shift"),
        related_id: Some(shift_id),
    }
}

/// Notification to the event creator when a shift is accepted or claimed.
pub fn shift_accepted(created_by: DbId, shift_id: DbId, role: &str, event_title: &str) -> NewNotification {
    NewNotification {
        user_id: created_by,
        kind: KIND_SHIFT_ACCEPTED.into(),
        title: "Shift Accepted".into(),
        message: format!("A staff member accepted the {role} shift for {event_title}"),
        related_id: Some(shift_id),
    }
}

/// Notification to the event creator when a shift offer is declined.
pub fn shift_rejected(created_by: DbId, shift_id: DbId, role: &str, event_title: &str) -> NewNotification {
    NewNotification {
        user_id: created_by,
        kind: KIND_SHIFT_REJECTED.into(),
        title: "Shift Declined".into(),
        message: format!("A staff member declined the {role} shift for {event_title}"),
        related_id: Some(shift_id),
    }
}

/// Notification to the recipient of a direct message. The content preview
/// is capped so a long message never bloats the notification row.
pub fn new_message(recipient_id: DbId, message_id: DbId, content: &str) -> NewNotification {
    let preview: String = content.chars().take(MESSAGE_PREVIEW_LEN).collect();
    NewNotification {
        user_id: recipient_id,
        kind: KIND_NEW_MESSAGE.into(),
        title: "New Message".into(),
        message: preview,
        related_id: Some(message_id),
    }
}

/// Notification to the reviewee when a review is created.
pub fn new_review(reviewee_id: DbId, review_id: DbId, rating: i32) -> NewNotification {
    NewNotification {
        user_id: reviewee_id,
        kind: KIND_NEW_REVIEW.into(),
        title: "New Performance Review".into(),
        message: format!("You received a {rating}-star review"),
        related_id: Some(review_id),
    }
}
