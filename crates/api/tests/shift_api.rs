//! Integration tests for the shift lifecycle: creation rules, the respond
//! state machine, admin overrides, and the notification side-effects.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{build_test_app, seed_event, TestApp};
use crewline_core::notify::{KIND_SHIFT_ACCEPTED, KIND_SHIFT_OFFER, KIND_SHIFT_REJECTED};
use crewline_core::types::DbId;

async fn create_shift(
    app: &TestApp,
    admin_token: &str,
    event_id: DbId,
    staff_id: Option<DbId>,
    assignment_type: &str,
) -> serde_json::Value {
    let (status, body) = app
        .post(
            "/api/v1/shifts",
            admin_token,
            json!({
                "event_id": event_id,
                "staff_id": staff_id,
                "role": "bartender",
                "assignment_type": assignment_type,
                "pay_rate": 1850
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "shift creation failed: {body}");
    body["data"].clone()
}

#[tokio::test]
async fn initial_status_follows_assignment_rules() {
    let app = build_test_app();
    let (admin_id, admin_token) = app.admin();
    let (staff_id, _) = app.staff();
    let event_id = seed_event(&app, admin_id).await;

    let auto = create_shift(&app, &admin_token, event_id, Some(staff_id), "autoconfirm").await;
    assert_eq!(auto["status"], "confirmed");
    assert!(auto["assigned_at"].is_string());

    let offer = create_shift(&app, &admin_token, event_id, Some(staff_id), "seekreply").await;
    assert_eq!(offer["status"], "pending");

    let published = create_shift(&app, &admin_token, event_id, None, "publishing").await;
    assert_eq!(published["status"], "open");
    assert!(published["assigned_at"].is_null());
}

#[tokio::test]
async fn create_rejects_bad_input() {
    let app = build_test_app();
    let (admin_id, admin_token) = app.admin();
    let event_id = seed_event(&app, admin_id).await;

    let (status, body) = app
        .post(
            "/api/v1/shifts",
            &admin_token,
            json!({"event_id": event_id, "role": "  ", "assignment_type": "publishing"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = app
        .post(
            "/api/v1/shifts",
            &admin_token,
            json!({"event_id": event_id, "role": "bartender", "assignment_type": "raffle"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post(
            "/api/v1/shifts",
            &admin_token,
            json!({
                "event_id": uuid::Uuid::new_v4(),
                "role": "bartender",
                "assignment_type": "publishing"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn offered_shift_notifies_the_offeree() {
    let app = build_test_app();
    let (admin_id, admin_token) = app.admin();
    let (staff_id, staff_token) = app.staff();
    let event_id = seed_event(&app, admin_id).await;

    create_shift(&app, &admin_token, event_id, Some(staff_id), "seekreply").await;

    let (status, body) = app.get("/api/v1/notifications", &staff_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["kind"], KIND_SHIFT_OFFER);
    assert!(body["data"][0]["message"]
        .as_str()
        .unwrap()
        .contains("bartender"));

    // Autoconfirm assignments skip the offer notification.
    create_shift(&app, &admin_token, event_id, Some(staff_id), "autoconfirm").await;
    let (_, body) = app.get("/api/v1/notifications", &staff_token).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn seekreply_accept_flow_end_to_end() {
    let app = build_test_app();
    let (admin_id, admin_token) = app.admin();
    let (staff_id, staff_token) = app.staff();
    let event_id = seed_event(&app, admin_id).await;

    let shift = create_shift(&app, &admin_token, event_id, Some(staff_id), "seekreply").await;
    let shift_id = shift["id"].as_str().unwrap().to_string();

    // A different staff member cannot accept someone else's offer.
    let (_, intruder_token) = app.staff();
    let (status, body) = app
        .post(
            &format!("/api/v1/shifts/{shift_id}/respond"),
            &intruder_token,
            json!({"action": "accept"}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    // The offeree accepts.
    let (status, body) = app
        .post(
            &format!("/api/v1/shifts/{shift_id}/respond"),
            &staff_token,
            json!({"action": "accept"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "confirmed");
    assert!(body["data"]["responded_at"].is_string());

    // The event owner hears about it.
    let admin_token_notifications = {
        let (status, body) = app
            .get("/api/v1/notifications", &admin_token)
            .await;
        assert_eq!(status, StatusCode::OK);
        body
    };
    let kinds: Vec<&str> = admin_token_notifications["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["kind"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&KIND_SHIFT_ACCEPTED));
}

#[tokio::test]
async fn reject_reopens_the_shift() {
    let app = build_test_app();
    let (admin_id, admin_token) = app.admin();
    let (staff_id, staff_token) = app.staff();
    let event_id = seed_event(&app, admin_id).await;

    let shift = create_shift(&app, &admin_token, event_id, Some(staff_id), "seekreply").await;
    let shift_id = shift["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(
            &format!("/api/v1/shifts/{shift_id}/respond"),
            &staff_token,
            json!({"action": "reject"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "open");
    assert!(body["data"]["staff_id"].is_null());

    let (_, body) = app.get("/api/v1/notifications", &admin_token).await;
    assert_eq!(body["data"][0]["kind"], KIND_SHIFT_REJECTED);
}

#[tokio::test]
async fn publishing_claim_flow_and_claim_guards() {
    let app = build_test_app();
    let (admin_id, admin_token) = app.admin();
    let (staff_id, staff_token) = app.staff();
    let event_id = seed_event(&app, admin_id).await;

    let shift = create_shift(&app, &admin_token, event_id, None, "publishing").await;
    let shift_id = shift["id"].as_str().unwrap().to_string();

    // Visible on the claim board.
    let (_, board) = app.get("/api/v1/shifts/available", &staff_token).await;
    assert_eq!(board["data"].as_array().unwrap().len(), 1);

    let (status, body) = app
        .post(
            &format!("/api/v1/shifts/{shift_id}/respond"),
            &staff_token,
            json!({"action": "claim"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "confirmed");
    assert_eq!(body["data"]["staff_id"], json!(staff_id));

    // A second claimer lost the race.
    let (_, loser_token) = app.staff();
    let (status, body) = app
        .post(
            &format!("/api/v1/shifts/{shift_id}/respond"),
            &loser_token,
            json!({"action": "claim"}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    // Claimed shift no longer appears on the board, but does in "my shifts".
    let (_, board) = app.get("/api/v1/shifts/available", &staff_token).await;
    assert!(board["data"].as_array().unwrap().is_empty());
    let (_, mine) = app.get("/api/v1/shifts/my", &staff_token).await;
    assert_eq!(mine["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn claim_is_invalid_for_directed_shifts() {
    let app = build_test_app();
    let (admin_id, admin_token) = app.admin();
    let (staff_id, _) = app.staff();
    let event_id = seed_event(&app, admin_id).await;

    let shift = create_shift(&app, &admin_token, event_id, Some(staff_id), "seekreply").await;
    let shift_id = shift["id"].as_str().unwrap().to_string();

    let (_, other_token) = app.staff();
    let (status, body) = app
        .post(
            &format!("/api/v1/shifts/{shift_id}/respond"),
            &other_token,
            json!({"action": "claim"}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_STATE");
}

#[tokio::test]
async fn respond_rejects_unknown_actions_and_missing_shifts() {
    let app = build_test_app();
    let (_, staff_token) = app.staff();

    // Unknown action fails before any lookup, so even a bogus id yields 400.
    let bogus = uuid::Uuid::new_v4();
    let (status, body) = app
        .post(
            &format!("/api/v1/shifts/{bogus}/respond"),
            &staff_token,
            json!({"action": "maybe"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = app
        .post(
            &format!("/api/v1/shifts/{bogus}/respond"),
            &staff_token,
            json!({"action": "accept"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn admin_patch_is_typed_and_guarded() {
    let app = build_test_app();
    let (admin_id, admin_token) = app.admin();
    let (_, staff_token) = app.staff();
    let event_id = seed_event(&app, admin_id).await;

    let shift = create_shift(&app, &admin_token, event_id, None, "publishing").await;
    let shift_id = shift["id"].as_str().unwrap().to_string();

    // Staff cannot use the admin override.
    let (status, _) = app
        .patch(
            &format!("/api/v1/shifts/{shift_id}"),
            &staff_token,
            json!({"pay_rate": 2000}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Empty patch is rejected.
    let (status, body) = app
        .patch(&format!("/api/v1/shifts/{shift_id}"), &admin_token, json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Unknown status values are rejected.
    let (status, _) = app
        .patch(
            &format!("/api/v1/shifts/{shift_id}"),
            &admin_token,
            json!({"status": "limbo"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // A legal patch goes through and stamps responded_at.
    let (status, body) = app
        .patch(
            &format!("/api/v1/shifts/{shift_id}"),
            &admin_token,
            json!({"pay_rate": 2000, "notes": "bring a corkscrew"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pay_rate"], 2000);
    assert_eq!(body["data"]["notes"], "bring a corkscrew");
    assert!(body["data"]["responded_at"].is_string());

    // Explicit null clears the assignee.
    let (status, body) = app
        .patch(
            &format!("/api/v1/shifts/{shift_id}"),
            &admin_token,
            json!({"staff_id": null, "status": "open"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["staff_id"].is_null());
    assert_eq!(body["data"]["status"], "open");
}

#[tokio::test]
async fn event_shift_listing_requires_existing_event() {
    let app = build_test_app();
    let (admin_id, admin_token) = app.admin();
    let event_id = seed_event(&app, admin_id).await;

    create_shift(&app, &admin_token, event_id, None, "publishing").await;

    let (status, body) = app
        .get(&format!("/api/v1/events/{event_id}/shifts"), &admin_token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let bogus = uuid::Uuid::new_v4();
    let (status, _) = app
        .get(&format!("/api/v1/events/{bogus}/shifts"), &admin_token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
