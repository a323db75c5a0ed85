//! Handlers for the `/messages` resource.
//!
//! Only sending lives here; thread rendering and read-marking are served
//! elsewhere. Sending fans out both a durable notification for the
//! recipient and a realtime push to both participants.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crewline_core::message::validate_message_content;
use crewline_core::notify;
use crewline_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /messages`.
#[derive(Debug, Deserialize)]
pub struct SendMessage {
    pub recipient_id: DbId,
    pub content: String,
}

/// POST /api/v1/messages
pub async fn send_message(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SendMessage>,
) -> AppResult<impl IntoResponse> {
    validate_message_content(&input.content)?;

    let message = state
        .store
        .create_message(auth.user_id, input.recipient_id, input.content)
        .await?;

    state
        .notifier
        .notify(notify::new_message(
            message.recipient_id,
            message.id,
            &message.content,
        ))
        .await;
    state.notifier.push_message(&message).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}
