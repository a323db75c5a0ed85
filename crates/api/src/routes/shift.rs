//! Route definitions for the `/shifts` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::shift;
use crate::state::AppState;

/// Routes mounted at `/shifts`.
///
/// ```text
/// POST   /               -> create_shift (admin)
/// GET    /my             -> list_my_shifts
/// GET    /available      -> list_available_shifts
/// PATCH  /{id}           -> update_shift (admin)
/// DELETE /{id}           -> delete_shift (admin)
/// POST   /{id}/respond   -> respond_to_shift
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(shift::create_shift))
        .route("/my", get(shift::list_my_shifts))
        .route("/available", get(shift::list_available_shifts))
        .route(
            "/{id}",
            patch(shift::update_shift).delete(shift::delete_shift),
        )
        .route("/{id}/respond", post(shift::respond_to_shift))
}
