//! Route definitions for the `/reviews` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// ```text
/// POST   /   -> create_review
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(review::create_review))
}
