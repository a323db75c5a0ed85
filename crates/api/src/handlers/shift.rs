//! Handlers for the `/shifts` resource: creation, the respond state
//! machine, admin edits, and the staff-facing boards.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crewline_core::error::CoreError;
use crewline_core::model::{NewShift, Shift, ShiftPatch};
use crewline_core::notify;
use crewline_core::shift::{
    ensure_accept_allowed, ensure_claimable, initial_status, parse_respond_action,
    validate_new_shift, validate_shift_status, RespondAction, ASSIGNMENT_AUTOCONFIRM,
};
use crewline_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /shifts`.
#[derive(Debug, Deserialize)]
pub struct CreateShift {
    pub event_id: DbId,
    pub staff_id: Option<DbId>,
    pub role: String,
    pub assignment_type: String,
    pub pay_rate: Option<i32>,
    pub notes: Option<String>,
    pub break_minutes: Option<i32>,
}

/// Request body for `POST /shifts/{id}/respond`.
#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub action: String,
}

/// POST /api/v1/shifts (admin)
///
/// A staffed shift starts `confirmed` (autoconfirm) or `pending`; an
/// unstaffed one starts `open`. Offering a shift (staffed, not
/// autoconfirm) notifies the staff member.
pub async fn create_shift(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateShift>,
) -> AppResult<impl IntoResponse> {
    validate_new_shift(&input.role, &input.assignment_type)?;

    state
        .store
        .get_event(input.event_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Event",
            id: input.event_id,
        })?;

    let status = initial_status(&input.assignment_type, input.staff_id.is_some());
    let offered_to = (input.assignment_type != ASSIGNMENT_AUTOCONFIRM)
        .then_some(input.staff_id)
        .flatten();

    let shift = state
        .store
        .create_shift(NewShift {
            event_id: input.event_id,
            staff_id: input.staff_id,
            role: input.role,
            assignment_type: input.assignment_type,
            status: status.into(),
            pay_rate: input.pay_rate,
            notes: input.notes,
            break_minutes: input.break_minutes,
            assigned_at: input.staff_id.map(|_| Utc::now()),
        })
        .await?;

    if let Some(staff_id) = offered_to {
        state
            .notifier
            .notify(notify::shift_offer(staff_id, shift.id, &shift.role))
            .await;
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: shift })))
}

/// POST /api/v1/shifts/{id}/respond
///
/// Executes one of the three staff responses. The action is parsed before
/// any read so a bad payload never touches state; the actual transitions
/// are conditional writes in the store, so racing callers cannot both
/// succeed.
pub async fn respond_to_shift(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(shift_id): Path<DbId>,
    Json(input): Json<RespondRequest>,
) -> AppResult<Json<DataResponse<Shift>>> {
    let action = parse_respond_action(&input.action)?;

    let shift = state
        .store
        .get_shift(shift_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Shift",
            id: shift_id,
        })?;

    let now = Utc::now();
    let updated = match action {
        RespondAction::Claim => {
            ensure_claimable(&shift)?;
            state
                .store
                .claim_shift(shift_id, auth.user_id, now)
                .await?
                .ok_or(CoreError::Conflict("Shift is no longer open".into()))?
        }
        RespondAction::Accept => {
            ensure_accept_allowed(&shift, auth.user_id)?;
            state
                .store
                .confirm_shift(shift_id, auth.user_id, now)
                .await?
                .ok_or(CoreError::Conflict(
                    "Shift assignment changed, please retry".into(),
                ))?
        }
        RespondAction::Reject => state
            .store
            .release_shift(shift_id, now)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Shift",
                id: shift_id,
            })?,
    };

    // Tell the event owner what happened. A missing event means it was
    // deleted mid-flight; the transition itself already committed.
    if let Some(event) = state.store.get_event(updated.event_id).await? {
        let notification = match action {
            RespondAction::Accept | RespondAction::Claim => {
                notify::shift_accepted(event.created_by, updated.id, &updated.role, &event.title)
            }
            RespondAction::Reject => {
                notify::shift_rejected(event.created_by, updated.id, &updated.role, &event.title)
            }
        };
        state.notifier.notify(notification).await;
    }

    Ok(Json(DataResponse { data: updated }))
}

/// PATCH /api/v1/shifts/{id} (admin)
///
/// Typed patch of the mutable fields. Status set here is an unconstrained
/// override of the respond state machine.
pub async fn update_shift(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(shift_id): Path<DbId>,
    Json(patch): Json<ShiftPatch>,
) -> AppResult<Json<DataResponse<Shift>>> {
    if patch.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No fields to update".into(),
        )));
    }
    if let Some(status) = &patch.status {
        validate_shift_status(status)?;
    }

    let shift = state
        .store
        .update_shift(shift_id, patch, Utc::now())
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Shift",
            id: shift_id,
        })?;

    Ok(Json(DataResponse { data: shift }))
}

/// DELETE /api/v1/shifts/{id} (admin)
pub async fn delete_shift(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(shift_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = state.store.delete_shift(shift_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Shift",
            id: shift_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/events/{id}/shifts
pub async fn list_event_shifts(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Shift>>>> {
    state
        .store
        .get_event(event_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        })?;

    let shifts = state.store.list_shifts_by_event(event_id).await?;
    Ok(Json(DataResponse { data: shifts }))
}

/// GET /api/v1/shifts/my
pub async fn list_my_shifts(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Shift>>>> {
    let shifts = state.store.list_shifts_by_staff(auth.user_id).await?;
    Ok(Json(DataResponse { data: shifts }))
}

/// GET /api/v1/shifts/available
///
/// The claim board: open shifts that are published to the pool or
/// unassigned, soonest event first.
pub async fn list_available_shifts(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Shift>>>> {
    let shifts = state.store.list_open_shifts().await?;
    Ok(Json(DataResponse { data: shifts }))
}
