//! Row types mapping table columns onto the core entities.
//!
//! sqlx's `FromRow` cannot be derived for types in `crewline-core`
//! directly, so each table gets a thin row struct plus a lossless
//! conversion.

use sqlx::FromRow;

use crewline_core::model::{Event, Message, Notification, Review, Shift, TimeEntry};
use crewline_core::types::{DbId, Timestamp};

#[derive(Debug, FromRow)]
pub struct EventRow {
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

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            title: row.title,
            venue: row.venue,
            venue_address: row.venue_address,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            description: row.description,
            uniform_requirements: row.uniform_requirements,
            special_instructions: row.special_instructions,
            status: row.status,
            required_staff: row.required_staff,
            created_by: row.created_by,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct ShiftRow {
    pub id: DbId,
    pub event_id: DbId,
    pub staff_id: Option<DbId>,
    pub role: String,
    pub assignment_type: String,
    pub status: String,
    pub pay_rate: Option<i32>,
    pub notes: Option<String>,
    pub break_minutes: Option<i32>,
    pub assigned_at: Option<Timestamp>,
    pub responded_at: Option<Timestamp>,
}

impl From<ShiftRow> for Shift {
    fn from(row: ShiftRow) -> Self {
        Shift {
            id: row.id,
            event_id: row.event_id,
            staff_id: row.staff_id,
            role: row.role,
            assignment_type: row.assignment_type,
            status: row.status,
            pay_rate: row.pay_rate,
            notes: row.notes,
            break_minutes: row.break_minutes,
            assigned_at: row.assigned_at,
            responded_at: row.responded_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct TimeEntryRow {
    pub id: DbId,
    pub shift_id: DbId,
    pub staff_id: DbId,
    pub clock_in: Timestamp,
    pub clock_out: Option<Timestamp>,
    pub total_minutes: Option<i32>,
    pub break_minutes: Option<i32>,
    pub status: String,
}

impl From<TimeEntryRow> for TimeEntry {
    fn from(row: TimeEntryRow) -> Self {
        TimeEntry {
            id: row.id,
            shift_id: row.shift_id,
            staff_id: row.staff_id,
            clock_in: row.clock_in,
            clock_out: row.clock_out,
            total_minutes: row.total_minutes,
            break_minutes: row.break_minutes,
            status: row.status,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct NotificationRow {
    pub id: DbId,
    pub user_id: DbId,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub related_id: Option<DbId>,
    pub created_at: Timestamp,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Notification {
            id: row.id,
            user_id: row.user_id,
            kind: row.kind,
            title: row.title,
            message: row.message,
            is_read: row.is_read,
            related_id: row.related_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct MessageRow {
    pub id: DbId,
    pub sender_id: DbId,
    pub recipient_id: DbId,
    pub content: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Message {
            id: row.id,
            sender_id: row.sender_id,
            recipient_id: row.recipient_id,
            content: row.content,
            is_read: row.is_read,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct ReviewRow {
    pub id: DbId,
    pub shift_id: DbId,
    pub reviewer_id: DbId,
    pub reviewee_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: row.id,
            shift_id: row.shift_id,
            reviewer_id: row.reviewer_id,
            reviewee_id: row.reviewee_id,
            rating: row.rating,
            comment: row.comment,
            created_at: row.created_at,
        }
    }
}
