//! Handlers for the `/time` resource (clock-in / clock-out).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crewline_core::error::CoreError;
use crewline_core::model::TimeEntry;
use crewline_core::store::StoreError;
use crewline_core::timeclock::{elapsed_minutes, ensure_clock_in_allowed};
use crewline_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /time/clock-in`.
#[derive(Debug, Deserialize)]
pub struct ClockInRequest {
    pub shift_id: DbId,
}

/// POST /api/v1/time/clock-in
///
/// The shift must be assigned to the caller and confirmed. The
/// one-active-entry rule is enforced by the storage write itself, so a
/// racing second clock-in comes back as a unique violation rather than
/// slipping past a read check.
pub async fn clock_in(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ClockInRequest>,
) -> AppResult<impl IntoResponse> {
    let shift = state
        .store
        .get_shift(input.shift_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Shift",
            id: input.shift_id,
        })?;

    ensure_clock_in_allowed(&shift, auth.user_id)?;

    let entry = state
        .store
        .insert_active_entry(input.shift_id, auth.user_id, Utc::now())
        .await
        .map_err(|err| match err {
            StoreError::UniqueViolation(_) => {
                AppError::Core(CoreError::Conflict("Already clocked in".into()))
            }
            other => AppError::Store(other),
        })?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// POST /api/v1/time/clock-out
///
/// Finalizes the caller's active entry with a server-stamped clock-out and
/// floored elapsed minutes.
pub async fn clock_out(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<TimeEntry>>> {
    let active = state
        .store
        .get_active_entry(auth.user_id)
        .await?
        .ok_or(CoreError::InvalidState("Not clocked in".into()))?;

    let clock_out = Utc::now();
    let total_minutes = elapsed_minutes(active.clock_in, clock_out);

    let entry = state
        .store
        .finalize_entry(active.id, clock_out, total_minutes)
        .await?
        .ok_or(CoreError::Conflict("Time entry already finalized".into()))?;

    Ok(Json(DataResponse { data: entry }))
}

/// GET /api/v1/time/active
///
/// The caller's running entry, or `null` when not clocked in.
pub async fn active_entry(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Option<TimeEntry>>>> {
    let entry = state.store.get_active_entry(auth.user_id).await?;
    Ok(Json(DataResponse { data: entry }))
}

/// GET /api/v1/time/history
pub async fn entry_history(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<TimeEntry>>>> {
    let entries = state.store.list_entries_by_staff(auth.user_id).await?;
    Ok(Json(DataResponse { data: entries }))
}
