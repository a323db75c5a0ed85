//! The persistence gateway: typed CRUD and state-guarded transition
//! operations over the Crewline entities.
//!
//! Implementations live in `crewline-db` (`PgStore` for Postgres,
//! `MemStore` for DB-less development and tests). The trait carries no
//! business logic; the one deliberate exception is that the transition
//! methods are *conditional writes* so that concurrent callers can never
//! both succeed (see `claim_shift` and `insert_active_entry`).

use async_trait::async_trait;

use crate::model::{
    Event, EventPatch, Message, NewEvent, NewNotification, NewReview, NewShift, Notification,
    Review, Shift, ShiftPatch, TimeEntry,
};
use crate::types::{DbId, Timestamp};

/// Infrastructure failure of the storage backend. Deliberately distinct
/// from [`crate::error::CoreError`]: business-rule violations never appear
/// here, and these are not retried by this layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness guarantee was violated; the name identifies which.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(&'static str),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap liveness probe for the health endpoint.
    async fn health_check(&self) -> StoreResult<()>;

    // -- Events ------------------------------------------------------------

    async fn create_event(&self, new: NewEvent) -> StoreResult<Event>;

    async fn get_event(&self, id: DbId) -> StoreResult<Option<Event>>;

    /// All events, most recent date first.
    async fn list_events(&self) -> StoreResult<Vec<Event>>;

    async fn update_event(&self, id: DbId, patch: EventPatch) -> StoreResult<Option<Event>>;

    /// Delete an event and cascade-delete its shifts. Returns `false` when
    /// the event did not exist.
    async fn delete_event(&self, id: DbId) -> StoreResult<bool>;

    // -- Shifts ------------------------------------------------------------

    async fn create_shift(&self, new: NewShift) -> StoreResult<Shift>;

    async fn get_shift(&self, id: DbId) -> StoreResult<Option<Shift>>;

    async fn list_shifts_by_event(&self, event_id: DbId) -> StoreResult<Vec<Shift>>;

    async fn list_shifts_by_staff(&self, staff_id: DbId) -> StoreResult<Vec<Shift>>;

    /// Open shifts that are published to the pool or unassigned, for the
    /// available-shifts board.
    async fn list_open_shifts(&self) -> StoreResult<Vec<Shift>>;

    /// Admin free-form edit. Stamps `responded_at` on every call. Returns
    /// `None` when the shift does not exist.
    async fn update_shift(
        &self,
        id: DbId,
        patch: ShiftPatch,
        responded_at: Timestamp,
    ) -> StoreResult<Option<Shift>>;

    async fn delete_shift(&self, id: DbId) -> StoreResult<bool>;

    /// Claim: confirm and assign, conditional on the shift still being
    /// `open` at the moment of the write. Returns `None` when the guard
    /// fails -- the caller lost the race (or the shift was never open).
    async fn claim_shift(
        &self,
        id: DbId,
        staff_id: DbId,
        now: Timestamp,
    ) -> StoreResult<Option<Shift>>;

    /// Accept: confirm, conditional on the shift still being assigned to
    /// `staff_id` at the moment of the write.
    async fn confirm_shift(
        &self,
        id: DbId,
        staff_id: DbId,
        now: Timestamp,
    ) -> StoreResult<Option<Shift>>;

    /// Reject: reopen the shift and clear its assignee.
    async fn release_shift(&self, id: DbId, now: Timestamp) -> StoreResult<Option<Shift>>;

    // -- Time entries ------------------------------------------------------

    /// Insert a new active entry. The at-most-one-active-entry-per-staff
    /// rule is enforced here, not by a preceding read: a second concurrent
    /// insert fails with [`StoreError::UniqueViolation`].
    async fn insert_active_entry(
        &self,
        shift_id: DbId,
        staff_id: DbId,
        clock_in: Timestamp,
    ) -> StoreResult<TimeEntry>;

    async fn get_active_entry(&self, staff_id: DbId) -> StoreResult<Option<TimeEntry>>;

    /// A staff member's entries, most recent clock-in first.
    async fn list_entries_by_staff(&self, staff_id: DbId) -> StoreResult<Vec<TimeEntry>>;

    /// Finalize an entry, conditional on it still being active. Returns
    /// `None` when the entry is missing or already completed.
    async fn finalize_entry(
        &self,
        id: DbId,
        clock_out: Timestamp,
        total_minutes: i32,
    ) -> StoreResult<Option<TimeEntry>>;

    // -- Notifications -----------------------------------------------------

    async fn create_notification(&self, new: NewNotification) -> StoreResult<Notification>;

    /// A user's notifications, newest first, capped at `limit`.
    async fn list_notifications(&self, user_id: DbId, limit: i64)
        -> StoreResult<Vec<Notification>>;

    /// Returns `false` when the notification is missing or belongs to
    /// another user.
    async fn mark_notification_read(&self, id: DbId, user_id: DbId) -> StoreResult<bool>;

    /// Returns the number of notifications flipped.
    async fn mark_all_notifications_read(&self, user_id: DbId) -> StoreResult<u64>;

    async fn unread_notification_count(&self, user_id: DbId) -> StoreResult<i64>;

    // -- Messages ----------------------------------------------------------

    async fn create_message(
        &self,
        sender_id: DbId,
        recipient_id: DbId,
        content: String,
    ) -> StoreResult<Message>;

    // -- Reviews -----------------------------------------------------------

    async fn create_review(&self, new: NewReview) -> StoreResult<Review>;
}
