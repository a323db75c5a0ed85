//! Handlers for the `/reviews` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crewline_core::error::CoreError;
use crewline_core::model::NewReview;
use crewline_core::notify;
use crewline_core::review::validate_rating;
use crewline_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /reviews`.
#[derive(Debug, Deserialize)]
pub struct CreateReview {
    pub shift_id: DbId,
    pub reviewee_id: DbId,
    pub rating: i32,
    pub comment: Option<String>,
}

/// POST /api/v1/reviews
pub async fn create_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReview>,
) -> AppResult<impl IntoResponse> {
    validate_rating(input.rating)?;

    state
        .store
        .get_shift(input.shift_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Shift",
            id: input.shift_id,
        })?;

    let review = state
        .store
        .create_review(NewReview {
            shift_id: input.shift_id,
            reviewer_id: auth.user_id,
            reviewee_id: input.reviewee_id,
            rating: input.rating,
            comment: input.comment,
        })
        .await?;

    state
        .notifier
        .notify(notify::new_review(
            review.reviewee_id,
            review.id,
            review.rating,
        ))
        .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}
