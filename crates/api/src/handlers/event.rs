//! Handlers for the `/events` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crewline_core::error::CoreError;
use crewline_core::event::{validate_event_fields, validate_event_status, EVENT_STATUS_DRAFT};
use crewline_core::model::{Event, EventPatch, NewEvent};
use crewline_core::shift::SHIFT_STATUS_CONFIRMED;
use crewline_core::types::{DbId, Timestamp};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /events`.
#[derive(Debug, Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub venue: String,
    pub venue_address: Option<String>,
    pub date: Timestamp,
    pub start_time: String,
    pub end_time: String,
    pub description: Option<String>,
    pub uniform_requirements: Option<String>,
    pub special_instructions: Option<String>,
    /// Defaults to `draft` when omitted.
    pub status: Option<String>,
    /// Defaults to `0` when omitted.
    pub required_staff: Option<i32>,
}

/// GET /api/v1/events
pub async fn list_events(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Event>>>> {
    let events = state.store.list_events().await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/events/{id}
///
/// Returns the event together with its shift counts so clients can render
/// a staffing summary without a second request.
pub async fn get_event(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let event = state
        .store
        .get_event(event_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        })?;

    let shifts = state.store.list_shifts_by_event(event_id).await?;
    let confirmed_count = shifts
        .iter()
        .filter(|s| s.status == SHIFT_STATUS_CONFIRMED)
        .count();

    let mut payload = serde_json::to_value(&event)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize event: {e}")))?;
    if let serde_json::Value::Object(map) = &mut payload {
        map.insert("shift_count".into(), shifts.len().into());
        map.insert("confirmed_count".into(), confirmed_count.into());
    }

    Ok(Json(serde_json::json!({ "data": payload })))
}

/// POST /api/v1/events (admin)
pub async fn create_event(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<impl IntoResponse> {
    validate_event_fields(&input.title, &input.venue, &input.start_time, &input.end_time)?;

    let status = input.status.unwrap_or_else(|| EVENT_STATUS_DRAFT.into());
    validate_event_status(&status)?;

    let event = state
        .store
        .create_event(NewEvent {
            title: input.title,
            venue: input.venue,
            venue_address: input.venue_address,
            date: input.date,
            start_time: input.start_time,
            end_time: input.end_time,
            description: input.description,
            uniform_requirements: input.uniform_requirements,
            special_instructions: input.special_instructions,
            status,
            required_staff: input.required_staff.unwrap_or(0),
            created_by: admin.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// PATCH /api/v1/events/{id} (admin)
pub async fn update_event(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(patch): Json<EventPatch>,
) -> AppResult<Json<DataResponse<Event>>> {
    if let Some(status) = &patch.status {
        validate_event_status(status)?;
    }

    let event = state
        .store
        .update_event(event_id, patch)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        })?;

    Ok(Json(DataResponse { data: event }))
}

/// DELETE /api/v1/events/{id} (admin)
///
/// Cascades to the event's shifts. Returns 204 No Content on success.
pub async fn delete_event(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = state.store.delete_event(event_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
