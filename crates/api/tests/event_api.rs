//! Integration tests for the `/events` resource.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{build_test_app, seed_event};

fn event_payload() -> serde_json::Value {
    json!({
        "title": "Summer Gala",
        "venue": "Grand Hall",
        "date": "2026-09-12T00:00:00Z",
        "start_time": "18:00",
        "end_time": "23:00",
        "status": "published",
        "required_staff": 2
    })
}

#[tokio::test]
async fn listing_requires_authentication() {
    let app = build_test_app();

    let (status, body) = app
        .request(Method::GET, "/api/v1/events", None, None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn creation_is_admin_only() {
    let app = build_test_app();
    let (_, staff_token) = app.staff();

    let (status, body) = app
        .post("/api/v1/events", &staff_token, event_payload())
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn create_validates_required_fields_and_status() {
    let app = build_test_app();
    let (_, admin_token) = app.admin();

    let mut blank_title = event_payload();
    blank_title["title"] = json!("   ");
    let (status, body) = app.post("/api/v1/events", &admin_token, blank_title).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let mut bad_status = event_payload();
    bad_status["status"] = json!("archived");
    let (status, _) = app.post("/api/v1/events", &admin_token, bad_status).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_get_patch_delete_flow() {
    let app = build_test_app();
    let (_, admin_token) = app.admin();

    let (status, body) = app
        .post("/api/v1/events", &admin_token, event_payload())
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let event_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["title"], "Summer Gala");

    // Detail view carries staffing counts.
    let (status, body) = app
        .get(&format!("/api/v1/events/{event_id}"), &admin_token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["shift_count"], 0);
    assert_eq!(body["data"]["confirmed_count"], 0);

    let (status, body) = app
        .patch(
            &format!("/api/v1/events/{event_id}"),
            &admin_token,
            json!({"venue": "River Terrace", "required_staff": 5}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["venue"], "River Terrace");
    assert_eq!(body["data"]["required_staff"], 5);

    let (status, _) = app
        .delete(&format!("/api/v1/events/{event_id}"), &admin_token)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app
        .get(&format!("/api/v1/events/{event_id}"), &admin_token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn deleting_an_event_cascades_to_shifts() {
    let app = build_test_app();
    let (admin_id, admin_token) = app.admin();
    let event_id = seed_event(&app, admin_id).await;

    let (status, body) = app
        .post(
            "/api/v1/shifts",
            &admin_token,
            json!({
                "event_id": event_id,
                "role": "bartender",
                "assignment_type": "publishing"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let shift_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .delete(&format!("/api/v1/events/{event_id}"), &admin_token)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The shift went with it.
    let (status, _) = app
        .delete(&format!("/api/v1/shifts/{shift_id}"), &admin_token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
