//! Route definitions for the `/messages` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::message;
use crate::state::AppState;

/// Routes mounted at `/messages`.
///
/// ```text
/// POST   /   -> send_message
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(message::send_message))
}
