pub mod event;
pub mod health;
pub mod message;
pub mod notification;
pub mod review;
pub mod shift;
pub mod time;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                              WebSocket (token query param)
///
/// /events                          list, create (create: admin only)
/// /events/{id}                     get, patch, delete (writes: admin only)
/// /events/{id}/shifts              list shifts for an event
///
/// /shifts                          create (admin only)
/// /shifts/my                       the caller's shifts
/// /shifts/available                open publishing/unassigned shifts
/// /shifts/{id}                     patch, delete (admin only)
/// /shifts/{id}/respond             accept / reject / claim (POST)
///
/// /time/clock-in                   start a time entry (POST)
/// /time/clock-out                  finalize the active entry (POST)
/// /time/active                     the caller's active entry (GET)
/// /time/history                    the caller's entries (GET)
///
/// /messages                        send a direct message (POST)
/// /reviews                         leave a review (POST)
///
/// /notifications                   list (?limit)
/// /notifications/read-all          mark all read (POST)
/// /notifications/unread-count      unread count (GET)
/// /notifications/{id}/read         mark read (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket endpoint.
        .route("/ws", get(ws::ws_handler))
        // Event CRUD plus per-event shift listing.
        .nest("/events", event::router())
        // Shift lifecycle: create, respond, patch, delete, boards.
        .nest("/shifts", shift::router())
        // Clock-in / clock-out.
        .nest("/time", time::router())
        // Direct messages (send only; threads are rendered elsewhere).
        .nest("/messages", message::router())
        // Performance reviews (create only).
        .nest("/reviews", review::router())
        // Notifications and read flows.
        .nest("/notifications", notification::router())
}
