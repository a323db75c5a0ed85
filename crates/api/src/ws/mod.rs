//! WebSocket infrastructure for real-time pushes.
//!
//! Provides connection management, heartbeat monitoring, and the HTTP
//! upgrade handler used by the Axum route tree.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
