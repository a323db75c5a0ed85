//! Postgres-backed [`Store`] implementation.
//!
//! State transitions are single conditional UPDATE statements so that two
//! concurrent callers can never both succeed; the at-most-one-active-entry
//! rule rides on the `uq_time_entries_active` partial unique index rather
//! than a read-before-write check.

use async_trait::async_trait;

use crewline_core::model::{
    Event, EventPatch, Message, NewEvent, NewNotification, NewReview, NewShift, Notification,
    Review, Shift, ShiftPatch, TimeEntry,
};
use crewline_core::shift::{ASSIGNMENT_PUBLISHING, SHIFT_STATUS_CONFIRMED, SHIFT_STATUS_OPEN};
use crewline_core::store::{Store, StoreError, StoreResult};
use crewline_core::timeclock::{ENTRY_STATUS_ACTIVE, ENTRY_STATUS_COMPLETED};
use crewline_core::types::{DbId, Timestamp};

use crate::models::{EventRow, MessageRow, NotificationRow, ReviewRow, ShiftRow, TimeEntryRow};
use crate::DbPool;

/// Column list for `events` queries.
const EVENT_COLUMNS: &str = "id, title, venue, venue_address, date, start_time, end_time, \
     description, uniform_requirements, special_instructions, status, required_staff, \
     created_by, created_at";

/// Column list for `shifts` queries.
const SHIFT_COLUMNS: &str = "id, event_id, staff_id, role, assignment_type, status, pay_rate, \
     notes, break_minutes, assigned_at, responded_at";

/// Column list for `time_entries` queries.
const ENTRY_COLUMNS: &str =
    "id, shift_id, staff_id, clock_in, clock_out, total_minutes, break_minutes, status";

/// Column list for `notifications` queries.
const NOTIFICATION_COLUMNS: &str =
    "id, user_id, kind, title, message, is_read, related_id, created_at";

pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

/// Map a unique-constraint violation on the named index; everything else
/// stays a backend error.
fn map_unique(err: sqlx::Error, constraint: &'static str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505")
            && db_err.constraint() == Some(constraint)
        {
            return StoreError::UniqueViolation(constraint);
        }
    }
    backend(err)
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(backend)
    }

    // -- Events ------------------------------------------------------------

    async fn create_event(&self, new: NewEvent) -> StoreResult<Event> {
        let query = format!(
            "INSERT INTO events (title, venue, venue_address, date, start_time, end_time, \
             description, uniform_requirements, special_instructions, status, required_staff, \
             created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, EventRow>(&query)
            .bind(&new.title)
            .bind(&new.venue)
            .bind(&new.venue_address)
            .bind(new.date)
            .bind(&new.start_time)
            .bind(&new.end_time)
            .bind(&new.description)
            .bind(&new.uniform_requirements)
            .bind(&new.special_instructions)
            .bind(&new.status)
            .bind(new.required_staff)
            .bind(new.created_by)
            .fetch_one(&self.pool)
            .await
            .map(Event::from)
            .map_err(backend)
    }

    async fn get_event(&self, id: DbId) -> StoreResult<Option<Event>> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, EventRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Event::from))
            .map_err(backend)
    }

    async fn list_events(&self) -> StoreResult<Vec<Event>> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY date DESC");
        sqlx::query_as::<_, EventRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map(|rows| rows.into_iter().map(Event::from).collect())
            .map_err(backend)
    }

    async fn update_event(&self, id: DbId, patch: EventPatch) -> StoreResult<Option<Event>> {
        // Admin edits are last-write-wins; only the respond/claim path
        // needs conditional updates.
        let Some(mut event) = self.get_event(id).await? else {
            return Ok(None);
        };
        patch.apply(&mut event);

        let query = format!(
            "UPDATE events SET title = $2, venue = $3, venue_address = $4, date = $5, \
             start_time = $6, end_time = $7, description = $8, uniform_requirements = $9, \
             special_instructions = $10, status = $11, required_staff = $12 \
             WHERE id = $1 \
             RETURNING {EVENT_COLUMNS}"
        );
        sqlx::query_as::<_, EventRow>(&query)
            .bind(id)
            .bind(&event.title)
            .bind(&event.venue)
            .bind(&event.venue_address)
            .bind(event.date)
            .bind(&event.start_time)
            .bind(&event.end_time)
            .bind(&event.description)
            .bind(&event.uniform_requirements)
            .bind(&event.special_instructions)
            .bind(&event.status)
            .bind(event.required_staff)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Event::from))
            .map_err(backend)
    }

    async fn delete_event(&self, id: DbId) -> StoreResult<bool> {
        // Shifts cascade via the foreign key.
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected() > 0)
    }

    // -- Shifts ------------------------------------------------------------

    async fn create_shift(&self, new: NewShift) -> StoreResult<Shift> {
        let query = format!(
            "INSERT INTO shifts (event_id, staff_id, role, assignment_type, status, pay_rate, \
             notes, break_minutes, assigned_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {SHIFT_COLUMNS}"
        );
        sqlx::query_as::<_, ShiftRow>(&query)
            .bind(new.event_id)
            .bind(new.staff_id)
            .bind(&new.role)
            .bind(&new.assignment_type)
            .bind(&new.status)
            .bind(new.pay_rate)
            .bind(&new.notes)
            .bind(new.break_minutes)
            .bind(new.assigned_at)
            .fetch_one(&self.pool)
            .await
            .map(Shift::from)
            .map_err(backend)
    }

    async fn get_shift(&self, id: DbId) -> StoreResult<Option<Shift>> {
        let query = format!("SELECT {SHIFT_COLUMNS} FROM shifts WHERE id = $1");
        sqlx::query_as::<_, ShiftRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Shift::from))
            .map_err(backend)
    }

    async fn list_shifts_by_event(&self, event_id: DbId) -> StoreResult<Vec<Shift>> {
        let query = format!("SELECT {SHIFT_COLUMNS} FROM shifts WHERE event_id = $1");
        sqlx::query_as::<_, ShiftRow>(&query)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map(|rows| rows.into_iter().map(Shift::from).collect())
            .map_err(backend)
    }

    async fn list_shifts_by_staff(&self, staff_id: DbId) -> StoreResult<Vec<Shift>> {
        let query = format!(
            "SELECT s.id, s.event_id, s.staff_id, s.role, s.assignment_type, s.status, \
             s.pay_rate, s.notes, s.break_minutes, s.assigned_at, s.responded_at \
             FROM shifts s \
             JOIN events e ON e.id = s.event_id \
             WHERE s.staff_id = $1 \
             ORDER BY e.date DESC"
        );
        sqlx::query_as::<_, ShiftRow>(&query)
            .bind(staff_id)
            .fetch_all(&self.pool)
            .await
            .map(|rows| rows.into_iter().map(Shift::from).collect())
            .map_err(backend)
    }

    async fn list_open_shifts(&self) -> StoreResult<Vec<Shift>> {
        let query = format!(
            "SELECT s.id, s.event_id, s.staff_id, s.role, s.assignment_type, s.status, \
             s.pay_rate, s.notes, s.break_minutes, s.assigned_at, s.responded_at \
             FROM shifts s \
             JOIN events e ON e.id = s.event_id \
             WHERE s.status = '{SHIFT_STATUS_OPEN}' \
               AND (s.assignment_type = '{ASSIGNMENT_PUBLISHING}' OR s.staff_id IS NULL) \
             ORDER BY e.date ASC"
        );
        sqlx::query_as::<_, ShiftRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map(|rows| rows.into_iter().map(Shift::from).collect())
            .map_err(backend)
    }

    async fn update_shift(
        &self,
        id: DbId,
        patch: ShiftPatch,
        responded_at: Timestamp,
    ) -> StoreResult<Option<Shift>> {
        let Some(mut shift) = self.get_shift(id).await? else {
            return Ok(None);
        };
        patch.apply(&mut shift);

        let query = format!(
            "UPDATE shifts SET staff_id = $2, role = $3, status = $4, pay_rate = $5, \
             notes = $6, break_minutes = $7, responded_at = $8 \
             WHERE id = $1 \
             RETURNING {SHIFT_COLUMNS}"
        );
        sqlx::query_as::<_, ShiftRow>(&query)
            .bind(id)
            .bind(shift.staff_id)
            .bind(&shift.role)
            .bind(&shift.status)
            .bind(shift.pay_rate)
            .bind(&shift.notes)
            .bind(shift.break_minutes)
            .bind(responded_at)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Shift::from))
            .map_err(backend)
    }

    async fn delete_shift(&self, id: DbId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM shifts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected() > 0)
    }

    async fn claim_shift(
        &self,
        id: DbId,
        staff_id: DbId,
        now: Timestamp,
    ) -> StoreResult<Option<Shift>> {
        // The status guard makes the first concurrent claimer win; the
        // loser matches zero rows.
        let query = format!(
            "UPDATE shifts \
             SET status = '{SHIFT_STATUS_CONFIRMED}', staff_id = $2, responded_at = $3 \
             WHERE id = $1 AND status = '{SHIFT_STATUS_OPEN}' \
             RETURNING {SHIFT_COLUMNS}"
        );
        sqlx::query_as::<_, ShiftRow>(&query)
            .bind(id)
            .bind(staff_id)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Shift::from))
            .map_err(backend)
    }

    async fn confirm_shift(
        &self,
        id: DbId,
        staff_id: DbId,
        now: Timestamp,
    ) -> StoreResult<Option<Shift>> {
        let query = format!(
            "UPDATE shifts \
             SET status = '{SHIFT_STATUS_CONFIRMED}', responded_at = $3 \
             WHERE id = $1 AND staff_id = $2 \
             RETURNING {SHIFT_COLUMNS}"
        );
        sqlx::query_as::<_, ShiftRow>(&query)
            .bind(id)
            .bind(staff_id)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Shift::from))
            .map_err(backend)
    }

    async fn release_shift(&self, id: DbId, now: Timestamp) -> StoreResult<Option<Shift>> {
        let query = format!(
            "UPDATE shifts \
             SET status = '{SHIFT_STATUS_OPEN}', staff_id = NULL, responded_at = $2 \
             WHERE id = $1 \
             RETURNING {SHIFT_COLUMNS}"
        );
        sqlx::query_as::<_, ShiftRow>(&query)
            .bind(id)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Shift::from))
            .map_err(backend)
    }

    // -- Time entries ------------------------------------------------------

    async fn insert_active_entry(
        &self,
        shift_id: DbId,
        staff_id: DbId,
        clock_in: Timestamp,
    ) -> StoreResult<TimeEntry> {
        let query = format!(
            "INSERT INTO time_entries (shift_id, staff_id, clock_in, status) \
             VALUES ($1, $2, $3, '{ENTRY_STATUS_ACTIVE}') \
             RETURNING {ENTRY_COLUMNS}"
        );
        sqlx::query_as::<_, TimeEntryRow>(&query)
            .bind(shift_id)
            .bind(staff_id)
            .bind(clock_in)
            .fetch_one(&self.pool)
            .await
            .map(TimeEntry::from)
            .map_err(|err| map_unique(err, "uq_time_entries_active"))
    }

    async fn get_active_entry(&self, staff_id: DbId) -> StoreResult<Option<TimeEntry>> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM time_entries \
             WHERE staff_id = $1 AND status = '{ENTRY_STATUS_ACTIVE}'"
        );
        sqlx::query_as::<_, TimeEntryRow>(&query)
            .bind(staff_id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(TimeEntry::from))
            .map_err(backend)
    }

    async fn list_entries_by_staff(&self, staff_id: DbId) -> StoreResult<Vec<TimeEntry>> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM time_entries \
             WHERE staff_id = $1 \
             ORDER BY clock_in DESC"
        );
        sqlx::query_as::<_, TimeEntryRow>(&query)
            .bind(staff_id)
            .fetch_all(&self.pool)
            .await
            .map(|rows| rows.into_iter().map(TimeEntry::from).collect())
            .map_err(backend)
    }

    async fn finalize_entry(
        &self,
        id: DbId,
        clock_out: Timestamp,
        total_minutes: i32,
    ) -> StoreResult<Option<TimeEntry>> {
        let query = format!(
            "UPDATE time_entries \
             SET clock_out = $2, total_minutes = $3, status = '{ENTRY_STATUS_COMPLETED}' \
             WHERE id = $1 AND status = '{ENTRY_STATUS_ACTIVE}' \
             RETURNING {ENTRY_COLUMNS}"
        );
        sqlx::query_as::<_, TimeEntryRow>(&query)
            .bind(id)
            .bind(clock_out)
            .bind(total_minutes)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(TimeEntry::from))
            .map_err(backend)
    }

    // -- Notifications -----------------------------------------------------

    async fn create_notification(&self, new: NewNotification) -> StoreResult<Notification> {
        let query = format!(
            "INSERT INTO notifications (user_id, kind, title, message, related_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {NOTIFICATION_COLUMNS}"
        );
        sqlx::query_as::<_, NotificationRow>(&query)
            .bind(new.user_id)
            .bind(&new.kind)
            .bind(&new.title)
            .bind(&new.message)
            .bind(new.related_id)
            .fetch_one(&self.pool)
            .await
            .map(Notification::from)
            .map_err(backend)
    }

    async fn list_notifications(
        &self,
        user_id: DbId,
        limit: i64,
    ) -> StoreResult<Vec<Notification>> {
        let query = format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications \
             WHERE user_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, NotificationRow>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map(|rows| rows.into_iter().map(Notification::from).collect())
            .map_err(backend)
    }

    async fn mark_notification_read(&self, id: DbId, user_id: DbId) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE \
             WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(result.rows_affected() > 0)
    }

    async fn mark_all_notifications_read(&self, user_id: DbId) -> StoreResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE \
             WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(result.rows_affected())
    }

    async fn unread_notification_count(&self, user_id: DbId) -> StoreResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)
    }

    // -- Messages ----------------------------------------------------------

    async fn create_message(
        &self,
        sender_id: DbId,
        recipient_id: DbId,
        content: String,
    ) -> StoreResult<Message> {
        sqlx::query_as::<_, MessageRow>(
            "INSERT INTO messages (sender_id, recipient_id, content) \
             VALUES ($1, $2, $3) \
             RETURNING id, sender_id, recipient_id, content, is_read, created_at",
        )
        .bind(sender_id)
        .bind(recipient_id)
        .bind(&content)
        .fetch_one(&self.pool)
        .await
        .map(Message::from)
        .map_err(backend)
    }

    // -- Reviews -----------------------------------------------------------

    async fn create_review(&self, new: NewReview) -> StoreResult<Review> {
        sqlx::query_as::<_, ReviewRow>(
            "INSERT INTO reviews (shift_id, reviewer_id, reviewee_id, rating, comment) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, shift_id, reviewer_id, reviewee_id, rating, comment, created_at",
        )
        .bind(new.shift_id)
        .bind(new.reviewer_id)
        .bind(new.reviewee_id)
        .bind(new.rating)
        .bind(&new.comment)
        .fetch_one(&self.pool)
        .await
        .map(Review::from)
        .map_err(backend)
    }
}
