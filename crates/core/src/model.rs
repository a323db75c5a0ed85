//! Entity types persisted by the store and serialized by the API.
//!
//! Creation payloads (`New*`) and typed patches (`*Patch`) live alongside
//! the entities so the [`crate::store::Store`] trait can speak in terms of
//! them. Patches enumerate only the legally mutable fields per entity;
//! there is no arbitrary key/value overlay anywhere in the system.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// A staffing event (concert, conference, ...) owning zero or more shifts.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub venue: String,
    pub venue_address: Option<String>,
    pub date: Timestamp,
    pub start_time: String,
    pub end_time: String,
    pub description: Option<String>,
    pub uniform_requirements: Option<String>,
    pub special_instructions: Option<String>,
    pub status: String,
    pub required_staff: i32,
    pub created_by: DbId,
    pub created_at: Timestamp,
}

/// Payload for creating an event. `created_by` is the acting admin.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub venue: String,
    pub venue_address: Option<String>,
    pub date: Timestamp,
    pub start_time: String,
    pub end_time: String,
    pub description: Option<String>,
    pub uniform_requirements: Option<String>,
    pub special_instructions: Option<String>,
    pub status: String,
    pub required_staff: i32,
    pub created_by: DbId,
}

/// Admin patch for an event. Omitted fields are left untouched; `Some(None)`
/// inner options are not representable here on purpose -- nullable text
/// fields are cleared by sending an empty string, which the handlers
/// normalize to NULL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub venue: Option<String>,
    pub venue_address: Option<String>,
    pub date: Option<Timestamp>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub description: Option<String>,
    pub uniform_requirements: Option<String>,
    pub special_instructions: Option<String>,
    pub status: Option<String>,
    pub required_staff: Option<i32>,
}

impl EventPatch {
    /// Fold this patch into an event. Nullable text fields are cleared by
    /// sending an empty (or blank) string.
    pub fn apply(&self, event: &mut Event) {
        if let Some(v) = &self.title {
            event.title = v.clone();
        }
        if let Some(v) = &self.venue {
            event.venue = v.clone();
        }
        if let Some(v) = &self.venue_address {
            event.venue_address = non_blank(v);
        }
        if let Some(v) = self.date {
            event.date = v;
        }
        if let Some(v) = &self.start_time {
            event.start_time = v.clone();
        }
        if let Some(v) = &self.end_time {
            event.end_time = v.clone();
        }
        if let Some(v) = &self.description {
            event.description = non_blank(v);
        }
        if let Some(v) = &self.uniform_requirements {
            event.uniform_requirements = non_blank(v);
        }
        if let Some(v) = &self.special_instructions {
            event.special_instructions = non_blank(v);
        }
        if let Some(v) = &self.status {
            event.status = v.clone();
        }
        if let Some(v) = self.required_staff {
            event.required_staff = v;
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Distinguish an omitted JSON field from an explicit `null`: an omitted
/// field never reaches this function (serde uses the `default`), so a
/// present value -- including `null` -- always lands in `Some(..)`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

/// A single staffable slot on an event.
#[derive(Debug, Clone, Serialize)]
pub struct Shift {
    pub id: DbId,
    pub event_id: DbId,
    pub staff_id: Option<DbId>,
    pub role: String,
    /// Fixed at creation; governs the transition rules.
    pub assignment_type: String,
    pub status: String,
    /// Integer cents per hour.
    pub pay_rate: Option<i32>,
    pub notes: Option<String>,
    pub break_minutes: Option<i32>,
    pub assigned_at: Option<Timestamp>,
    pub responded_at: Option<Timestamp>,
}

/// Payload for creating a shift. `status` and `assigned_at` are derived by
/// the assignment rules, never supplied by the caller.
#[derive(Debug, Clone)]
pub struct NewShift {
    pub event_id: DbId,
    pub staff_id: Option<DbId>,
    pub role: String,
    pub assignment_type: String,
    pub status: String,
    pub pay_rate: Option<i32>,
    pub notes: Option<String>,
    pub break_minutes: Option<i32>,
    pub assigned_at: Option<Timestamp>,
}

/// Admin patch for a shift. Setting `status` here is an unconstrained
/// override that bypasses the respond state machine; see DESIGN.md.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShiftPatch {
    /// Outer `None` = leave unchanged, `Some(None)` = clear the assignee
    /// (JSON `null`), `Some(Some(id))` = reassign.
    #[serde(default, deserialize_with = "double_option")]
    pub staff_id: Option<Option<DbId>>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub pay_rate: Option<i32>,
    pub notes: Option<String>,
    pub break_minutes: Option<i32>,
}

impl ShiftPatch {
    /// Fold this patch into a shift. `responded_at` is stamped by the
    /// store on every patched update, not here.
    pub fn apply(&self, shift: &mut Shift) {
        if let Some(v) = &self.staff_id {
            shift.staff_id = *v;
        }
        if let Some(v) = &self.role {
            shift.role = v.clone();
        }
        if let Some(v) = &self.status {
            shift.status = v.clone();
        }
        if let Some(v) = self.pay_rate {
            shift.pay_rate = Some(v);
        }
        if let Some(v) = &self.notes {
            shift.notes = non_blank(v);
        }
        if let Some(v) = self.break_minutes {
            shift.break_minutes = Some(v);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.staff_id.is_none()
            && self.role.is_none()
            && self.status.is_none()
            && self.pay_rate.is_none()
            && self.notes.is_none()
            && self.break_minutes.is_none()
    }
}

/// A clock-in/clock-out record against a confirmed shift.
#[derive(Debug, Clone, Serialize)]
pub struct TimeEntry {
    pub id: DbId,
    pub shift_id: DbId,
    pub staff_id: DbId,
    pub clock_in: Timestamp,
    pub clock_out: Option<Timestamp>,
    pub total_minutes: Option<i32>,
    pub break_minutes: Option<i32>,
    pub status: String,
}

/// A durable in-app notification. Append-only apart from the read flag.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    /// Tag identifying the triggering event (see [`crate::notify`]).
    pub kind: String,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub related_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// Payload for creating a notification.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: DbId,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub related_id: Option<DbId>,
}

/// A direct message between two users. Immutable once created except the
/// recipient's read flag.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: DbId,
    pub sender_id: DbId,
    pub recipient_id: DbId,
    pub content: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// A performance review left against a shift. Immutable.
#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub id: DbId,
    pub shift_id: DbId,
    pub reviewer_id: DbId,
    pub reviewee_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

/// Payload for creating a review.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub shift_id: DbId,
    pub reviewer_id: DbId,
    pub reviewee_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
}
