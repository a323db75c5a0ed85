//! Behavioural tests for `MemStore`, which doubles as the executable
//! contract for any `Store` implementation: the guards exercised here are
//! the same ones `PgStore` encodes as conditional UPDATEs.

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crewline_core::model::{NewEvent, NewShift, ShiftPatch};
use crewline_core::notify;
use crewline_core::shift::{
    ASSIGNMENT_PUBLISHING, ASSIGNMENT_SEEKREPLY, SHIFT_STATUS_CONFIRMED, SHIFT_STATUS_OPEN,
    SHIFT_STATUS_PENDING,
};
use crewline_core::store::{Store, StoreError};
use crewline_core::timeclock::{ENTRY_STATUS_ACTIVE, ENTRY_STATUS_COMPLETED};
use crewline_core::types::DbId;
use crewline_db::MemStore;

fn sample_event(created_by: DbId) -> NewEvent {
    NewEvent {
        title: "Warehouse Launch".into(),
        venue: "Dockside Hall".into(),
        venue_address: None,
        date: Utc::now() + Duration::days(7),
        start_time: "18:00".into(),
        end_time: "23:00".into(),
        description: None,
        uniform_requirements: None,
        special_instructions: None,
        status: "published".into(),
        required_staff: 4,
        created_by,
    }
}

fn sample_shift(event_id: DbId, staff_id: Option<DbId>, assignment_type: &str) -> NewShift {
    let status = crewline_core::shift::initial_status(assignment_type, staff_id.is_some());
    NewShift {
        event_id,
        staff_id,
        role: "bartender".into(),
        assignment_type: assignment_type.into(),
        status: status.into(),
        pay_rate: Some(1850),
        notes: None,
        break_minutes: None,
        assigned_at: staff_id.map(|_| Utc::now()),
    }
}

#[tokio::test]
async fn concurrent_claims_have_exactly_one_winner() {
    let store = Arc::new(MemStore::new());
    let event = store.create_event(sample_event(Uuid::new_v4())).await.unwrap();
    let shift = store
        .create_shift(sample_shift(event.id, None, ASSIGNMENT_PUBLISHING))
        .await
        .unwrap();
    assert_eq!(shift.status, SHIFT_STATUS_OPEN);

    let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());
    let now = Utc::now();
    let (a, b) = tokio::join!(
        store.claim_shift(shift.id, alice, now),
        store.claim_shift(shift.id, bob, now),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert!(a.is_some() != b.is_some(), "exactly one claimer must win");
    let winner = a.or(b).unwrap();
    assert_eq!(winner.status, SHIFT_STATUS_CONFIRMED);
    assert!(winner.staff_id == Some(alice) || winner.staff_id == Some(bob));
}

#[tokio::test]
async fn claim_fails_once_shift_is_no_longer_open() {
    let store = MemStore::new();
    let event = store.create_event(sample_event(Uuid::new_v4())).await.unwrap();
    let staff = Uuid::new_v4();
    let shift = store
        .create_shift(sample_shift(event.id, Some(staff), ASSIGNMENT_SEEKREPLY))
        .await
        .unwrap();
    assert_eq!(shift.status, SHIFT_STATUS_PENDING);

    let lost = store.claim_shift(shift.id, Uuid::new_v4(), Utc::now()).await.unwrap();
    assert!(lost.is_none());
}

#[tokio::test]
async fn confirm_is_guarded_on_the_assignee() {
    let store = MemStore::new();
    let event = store.create_event(sample_event(Uuid::new_v4())).await.unwrap();
    let staff = Uuid::new_v4();
    let shift = store
        .create_shift(sample_shift(event.id, Some(staff), ASSIGNMENT_SEEKREPLY))
        .await
        .unwrap();

    let stranger = store
        .confirm_shift(shift.id, Uuid::new_v4(), Utc::now())
        .await
        .unwrap();
    assert!(stranger.is_none());

    let confirmed = store
        .confirm_shift(shift.id, staff, Utc::now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(confirmed.status, SHIFT_STATUS_CONFIRMED);
    assert!(confirmed.responded_at.is_some());
}

#[tokio::test]
async fn release_reopens_and_clears_the_assignee() {
    let store = MemStore::new();
    let event = store.create_event(sample_event(Uuid::new_v4())).await.unwrap();
    let staff = Uuid::new_v4();
    let shift = store
        .create_shift(sample_shift(event.id, Some(staff), ASSIGNMENT_SEEKREPLY))
        .await
        .unwrap();

    let released = store
        .release_shift(shift.id, Utc::now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(released.status, SHIFT_STATUS_OPEN);
    assert_eq!(released.staff_id, None);
}

#[tokio::test]
async fn update_shift_patch_can_clear_the_assignee() {
    let store = MemStore::new();
    let event = store.create_event(sample_event(Uuid::new_v4())).await.unwrap();
    let shift = store
        .create_shift(sample_shift(event.id, Some(Uuid::new_v4()), ASSIGNMENT_SEEKREPLY))
        .await
        .unwrap();

    let patch = ShiftPatch {
        staff_id: Some(None),
        status: Some(SHIFT_STATUS_OPEN.into()),
        ..Default::default()
    };
    let updated = store
        .update_shift(shift.id, patch, Utc::now())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.staff_id, None);
    assert_eq!(updated.status, SHIFT_STATUS_OPEN);
}

#[tokio::test]
async fn deleting_an_event_cascades_to_its_shifts() {
    let store = MemStore::new();
    let event = store.create_event(sample_event(Uuid::new_v4())).await.unwrap();
    let shift = store
        .create_shift(sample_shift(event.id, None, ASSIGNMENT_PUBLISHING))
        .await
        .unwrap();

    assert!(store.delete_event(event.id).await.unwrap());
    assert!(store.get_shift(shift.id).await.unwrap().is_none());
    assert!(!store.delete_event(event.id).await.unwrap());
}

#[tokio::test]
async fn open_shift_board_excludes_directed_offers() {
    let store = MemStore::new();
    let event = store.create_event(sample_event(Uuid::new_v4())).await.unwrap();
    let published = store
        .create_shift(sample_shift(event.id, None, ASSIGNMENT_PUBLISHING))
        .await
        .unwrap();
    // Directed offer: pending, not on the board.
    store
        .create_shift(sample_shift(event.id, Some(Uuid::new_v4()), ASSIGNMENT_SEEKREPLY))
        .await
        .unwrap();

    let open = store.list_open_shifts().await.unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, published.id);
}

#[tokio::test]
async fn second_active_entry_is_a_unique_violation() {
    let store = MemStore::new();
    let staff = Uuid::new_v4();
    let shift_a = Uuid::new_v4();
    let shift_b = Uuid::new_v4();

    let entry = store
        .insert_active_entry(shift_a, staff, Utc::now())
        .await
        .unwrap();
    assert_eq!(entry.status, ENTRY_STATUS_ACTIVE);

    let err = store
        .insert_active_entry(shift_b, staff, Utc::now())
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::UniqueViolation("uq_time_entries_active"));
}

#[tokio::test]
async fn finalize_completes_an_active_entry_exactly_once() {
    let store = MemStore::new();
    let staff = Uuid::new_v4();
    let clock_in = Utc::now();
    let entry = store
        .insert_active_entry(Uuid::new_v4(), staff, clock_in)
        .await
        .unwrap();

    let clock_out = clock_in + Duration::minutes(90);
    let done = store
        .finalize_entry(entry.id, clock_out, 90)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(done.status, ENTRY_STATUS_COMPLETED);
    assert_eq!(done.total_minutes, Some(90));

    // Already completed: the guard rejects a second finalize.
    let again = store.finalize_entry(entry.id, clock_out, 90).await.unwrap();
    assert!(again.is_none());

    // And the staff member can clock in again.
    assert!(store.get_active_entry(staff).await.unwrap().is_none());
    store
        .insert_active_entry(Uuid::new_v4(), staff, Utc::now())
        .await
        .unwrap();
}

#[tokio::test]
async fn notification_read_flow() {
    let store = MemStore::new();
    let user = Uuid::new_v4();
    let other = Uuid::new_v4();

    let n1 = store
        .create_notification(notify::shift_offer(user, Uuid::new_v4(), "bartender"))
        .await
        .unwrap();
    store
        .create_notification(notify::new_review(user, Uuid::new_v4(), 5))
        .await
        .unwrap();
    store
        .create_notification(notify::shift_offer(other, Uuid::new_v4(), "security"))
        .await
        .unwrap();

    assert_eq!(store.unread_notification_count(user).await.unwrap(), 2);

    // Cross-user mark is refused.
    assert!(!store.mark_notification_read(n1.id, other).await.unwrap());
    assert!(store.mark_notification_read(n1.id, user).await.unwrap());
    assert_eq!(store.unread_notification_count(user).await.unwrap(), 1);

    assert_eq!(store.mark_all_notifications_read(user).await.unwrap(), 1);
    assert_eq!(store.unread_notification_count(user).await.unwrap(), 0);
    assert_eq!(store.unread_notification_count(other).await.unwrap(), 1);
}

#[tokio::test]
async fn notification_list_is_capped() {
    let store = MemStore::new();
    let user = Uuid::new_v4();
    for i in 0..5 {
        store
            .create_notification(notify::shift_offer(user, Uuid::new_v4(), &format!("role-{i}")))
            .await
            .unwrap();
    }
    let listed = store.list_notifications(user, 3).await.unwrap();
    assert_eq!(listed.len(), 3);
}
