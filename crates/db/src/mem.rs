//! In-memory [`Store`] for tests and DB-less development.
//!
//! All tables live behind one `tokio::sync::RwLock`, so every write holds
//! the lock exclusively and the conditional-update guards evaluated inside
//! it have the same effect as the conditional UPDATE statements in
//! [`crate::pg::PgStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crewline_core::model::{
    Event, EventPatch, Message, NewEvent, NewNotification, NewReview, NewShift, Notification,
    Review, Shift, ShiftPatch, TimeEntry,
};
use crewline_core::shift::{ASSIGNMENT_PUBLISHING, SHIFT_STATUS_CONFIRMED, SHIFT_STATUS_OPEN};
use crewline_core::store::{Store, StoreError, StoreResult};
use crewline_core::timeclock::{ENTRY_STATUS_ACTIVE, ENTRY_STATUS_COMPLETED};
use crewline_core::types::{DbId, Timestamp};

#[derive(Default)]
struct Inner {
    events: HashMap<DbId, Event>,
    shifts: HashMap<DbId, Shift>,
    time_entries: HashMap<DbId, TimeEntry>,
    notifications: HashMap<DbId, Notification>,
    messages: HashMap<DbId, Message>,
    reviews: HashMap<DbId, Review>,
}

#[derive(Default)]
pub struct MemStore {
    inner: RwLock<Inner>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    // -- Events ------------------------------------------------------------

    async fn create_event(&self, new: NewEvent) -> StoreResult<Event> {
        let event = Event {
            id: Uuid::new_v4(),
            title: new.title,
            venue: new.venue,
            venue_address: new.venue_address,
            date: new.date,
            start_time: new.start_time,
            end_time: new.end_time,
            description: new.description,
            uniform_requirements: new.uniform_requirements,
            special_instructions: new.special_instructions,
            status: new.status,
            required_staff: new.required_staff,
            created_by: new.created_by,
            created_at: Utc::now(),
        };
        let mut inner = self.inner.write().await;
        inner.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn get_event(&self, id: DbId) -> StoreResult<Option<Event>> {
        let inner = self.inner.read().await;
        Ok(inner.events.get(&id).cloned())
    }

    async fn list_events(&self) -> StoreResult<Vec<Event>> {
        let inner = self.inner.read().await;
        let mut events: Vec<Event> = inner.events.values().cloned().collect();
        events.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(events)
    }

    async fn update_event(&self, id: DbId, patch: EventPatch) -> StoreResult<Option<Event>> {
        let mut inner = self.inner.write().await;
        let Some(event) = inner.events.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply(event);
        Ok(Some(event.clone()))
    }

    async fn delete_event(&self, id: DbId) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        if inner.events.remove(&id).is_none() {
            return Ok(false);
        }
        inner.shifts.retain(|_, shift| shift.event_id != id);
        Ok(true)
    }

    // -- Shifts ------------------------------------------------------------

    async fn create_shift(&self, new: NewShift) -> StoreResult<Shift> {
        let shift = Shift {
            id: Uuid::new_v4(),
            event_id: new.event_id,
            staff_id: new.staff_id,
            role: new.role,
            assignment_type: new.assignment_type,
            status: new.status,
            pay_rate: new.pay_rate,
            notes: new.notes,
            break_minutes: new.break_minutes,
            assigned_at: new.assigned_at,
            responded_at: None,
        };
        let mut inner = self.inner.write().await;
        inner.shifts.insert(shift.id, shift.clone());
        Ok(shift)
    }

    async fn get_shift(&self, id: DbId) -> StoreResult<Option<Shift>> {
        let inner = self.inner.read().await;
        Ok(inner.shifts.get(&id).cloned())
    }

    async fn list_shifts_by_event(&self, event_id: DbId) -> StoreResult<Vec<Shift>> {
        let inner = self.inner.read().await;
        Ok(inner
            .shifts
            .values()
            .filter(|shift| shift.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn list_shifts_by_staff(&self, staff_id: DbId) -> StoreResult<Vec<Shift>> {
        let inner = self.inner.read().await;
        let mut shifts: Vec<Shift> = inner
            .shifts
            .values()
            .filter(|shift| shift.staff_id == Some(staff_id))
            .cloned()
            .collect();
        shifts.sort_by(|a, b| {
            let da = inner.events.get(&a.event_id).map(|e| e.date);
            let db = inner.events.get(&b.event_id).map(|e| e.date);
            db.cmp(&da)
        });
        Ok(shifts)
    }

    async fn list_open_shifts(&self) -> StoreResult<Vec<Shift>> {
        let inner = self.inner.read().await;
        let mut shifts: Vec<Shift> = inner
            .shifts
            .values()
            .filter(|shift| {
                shift.status == SHIFT_STATUS_OPEN
                    && (shift.assignment_type == ASSIGNMENT_PUBLISHING
                        || shift.staff_id.is_none())
            })
            .cloned()
            .collect();
        shifts.sort_by(|a, b| {
            let da = inner.events.get(&a.event_id).map(|e| e.date);
            let db = inner.events.get(&b.event_id).map(|e| e.date);
            da.cmp(&db)
        });
        Ok(shifts)
    }

    async fn update_shift(
        &self,
        id: DbId,
        patch: ShiftPatch,
        responded_at: Timestamp,
    ) -> StoreResult<Option<Shift>> {
        let mut inner = self.inner.write().await;
        let Some(shift) = inner.shifts.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply(shift);
        shift.responded_at = Some(responded_at);
        Ok(Some(shift.clone()))
    }

    async fn delete_shift(&self, id: DbId) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.shifts.remove(&id).is_some())
    }

    async fn claim_shift(
        &self,
        id: DbId,
        staff_id: DbId,
        now: Timestamp,
    ) -> StoreResult<Option<Shift>> {
        let mut inner = self.inner.write().await;
        let Some(shift) = inner.shifts.get_mut(&id) else {
            return Ok(None);
        };
        // Same guard as the conditional UPDATE: the loser of a race sees a
        // shift that is no longer open.
        if shift.status != SHIFT_STATUS_OPEN {
            return Ok(None);
        }
        shift.status = SHIFT_STATUS_CONFIRMED.to_string();
        shift.staff_id = Some(staff_id);
        shift.responded_at = Some(now);
        Ok(Some(shift.clone()))
    }

    async fn confirm_shift(
        &self,
        id: DbId,
        staff_id: DbId,
        now: Timestamp,
    ) -> StoreResult<Option<Shift>> {
        let mut inner = self.inner.write().await;
        let Some(shift) = inner.shifts.get_mut(&id) else {
            return Ok(None);
        };
        if shift.staff_id != Some(staff_id) {
            return Ok(None);
        }
        shift.status = SHIFT_STATUS_CONFIRMED.to_string();
        shift.responded_at = Some(now);
        Ok(Some(shift.clone()))
    }

    async fn release_shift(&self, id: DbId, now: Timestamp) -> StoreResult<Option<Shift>> {
        let mut inner = self.inner.write().await;
        let Some(shift) = inner.shifts.get_mut(&id) else {
            return Ok(None);
        };
        shift.status = SHIFT_STATUS_OPEN.to_string();
        shift.staff_id = None;
        shift.responded_at = Some(now);
        Ok(Some(shift.clone()))
    }

    // -- Time entries ------------------------------------------------------

    async fn insert_active_entry(
        &self,
        shift_id: DbId,
        staff_id: DbId,
        clock_in: Timestamp,
    ) -> StoreResult<TimeEntry> {
        let mut inner = self.inner.write().await;
        let already_active = inner
            .time_entries
            .values()
            .any(|entry| entry.staff_id == staff_id && entry.status == ENTRY_STATUS_ACTIVE);
        if already_active {
            return Err(StoreError::UniqueViolation("uq_time_entries_active"));
        }
        let entry = TimeEntry {
            id: Uuid::new_v4(),
            shift_id,
            staff_id,
            clock_in,
            clock_out: None,
            total_minutes: None,
            break_minutes: Some(0),
            status: ENTRY_STATUS_ACTIVE.to_string(),
        };
        inner.time_entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn get_active_entry(&self, staff_id: DbId) -> StoreResult<Option<TimeEntry>> {
        let inner = self.inner.read().await;
        Ok(inner
            .time_entries
            .values()
            .find(|entry| entry.staff_id == staff_id && entry.status == ENTRY_STATUS_ACTIVE)
            .cloned())
    }

    async fn list_entries_by_staff(&self, staff_id: DbId) -> StoreResult<Vec<TimeEntry>> {
        let inner = self.inner.read().await;
        let mut entries: Vec<TimeEntry> = inner
            .time_entries
            .values()
            .filter(|entry| entry.staff_id == staff_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.clock_in.cmp(&a.clock_in));
        Ok(entries)
    }

    async fn finalize_entry(
        &self,
        id: DbId,
        clock_out: Timestamp,
        total_minutes: i32,
    ) -> StoreResult<Option<TimeEntry>> {
        let mut inner = self.inner.write().await;
        let Some(entry) = inner.time_entries.get_mut(&id) else {
            return Ok(None);
        };
        if entry.status != ENTRY_STATUS_ACTIVE {
            return Ok(None);
        }
        entry.clock_out = Some(clock_out);
        entry.total_minutes = Some(total_minutes);
        entry.status = ENTRY_STATUS_COMPLETED.to_string();
        Ok(Some(entry.clone()))
    }

    // -- Notifications -----------------------------------------------------

    async fn create_notification(&self, new: NewNotification) -> StoreResult<Notification> {
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            kind: new.kind,
            title: new.title,
            message: new.message,
            is_read: false,
            related_id: new.related_id,
            created_at: Utc::now(),
        };
        let mut inner = self.inner.write().await;
        inner
            .notifications
            .insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn list_notifications(
        &self,
        user_id: DbId,
        limit: i64,
    ) -> StoreResult<Vec<Notification>> {
        let inner = self.inner.read().await;
        let mut notifications: Vec<Notification> = inner
            .notifications
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notifications.truncate(limit.max(0) as usize);
        Ok(notifications)
    }

    async fn mark_notification_read(&self, id: DbId, user_id: DbId) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        match inner.notifications.get_mut(&id) {
            Some(n) if n.user_id == user_id => {
                n.is_read = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn mark_all_notifications_read(&self, user_id: DbId) -> StoreResult<u64> {
        let mut inner = self.inner.write().await;
        let mut flipped = 0;
        for n in inner.notifications.values_mut() {
            if n.user_id == user_id && !n.is_read {
                n.is_read = true;
                flipped += 1;
            }
        }
        Ok(flipped)
    }

    async fn unread_notification_count(&self, user_id: DbId) -> StoreResult<i64> {
        let inner = self.inner.read().await;
        Ok(inner
            .notifications
            .values()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count() as i64)
    }

    // -- Messages ----------------------------------------------------------

    async fn create_message(
        &self,
        sender_id: DbId,
        recipient_id: DbId,
        content: String,
    ) -> StoreResult<Message> {
        let message = Message {
            id: Uuid::new_v4(),
            sender_id,
            recipient_id,
            content,
            is_read: false,
            created_at: Utc::now(),
        };
        let mut inner = self.inner.write().await;
        inner.messages.insert(message.id, message.clone());
        Ok(message)
    }

    // -- Reviews -----------------------------------------------------------

    async fn create_review(&self, new: NewReview) -> StoreResult<Review> {
        let review = Review {
            id: Uuid::new_v4(),
            shift_id: new.shift_id,
            reviewer_id: new.reviewer_id,
            reviewee_id: new.reviewee_id,
            rating: new.rating,
            comment: new.comment,
            created_at: Utc::now(),
        };
        let mut inner = self.inner.write().await;
        inner.reviews.insert(review.id, review.clone());
        Ok(review)
    }
}
