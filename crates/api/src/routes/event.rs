//! Route definitions for the `/events` resource.
//!
//! Reads require authentication; writes require the admin role (enforced in
//! the handlers via [`crate::middleware::rbac::RequireAdmin`]).

use axum::routing::get;
use axum::Router;

use crate::handlers::event;
use crate::handlers::shift;
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// GET    /               -> list_events
/// POST   /               -> create_event (admin)
/// GET    /{id}           -> get_event
/// PATCH  /{id}           -> update_event (admin)
/// DELETE /{id}           -> delete_event (admin)
/// GET    /{id}/shifts    -> list_event_shifts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(event::list_events).post(event::create_event))
        .route(
            "/{id}",
            get(event::get_event)
                .patch(event::update_event)
                .delete(event::delete_event),
        )
        .route("/{id}/shifts", get(shift::list_event_shifts))
}
