//! Route definitions for the `/time` resource (clock-in / clock-out).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::time;
use crate::state::AppState;

/// Routes mounted at `/time`.
///
/// ```text
/// POST   /clock-in    -> clock_in
/// POST   /clock-out   -> clock_out
/// GET    /active      -> active_entry
/// GET    /history     -> entry_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clock-in", post(time::clock_in))
        .route("/clock-out", post(time::clock_out))
        .route("/active", get(time::active_entry))
        .route("/history", get(time::entry_history))
}
