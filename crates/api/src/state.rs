use std::sync::Arc;

use crewline_core::store::Store;

use crate::config::ServerConfig;
use crate::notifier::Notifier;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway (`PgStore` in production, `MemStore` in tests).
    pub store: Arc<dyn Store>,
    /// Server configuration (accessed by extractors and handlers).
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager.
    pub ws_manager: Arc<WsManager>,
    /// Durable-notification-plus-realtime-push fan-out.
    pub notifier: Arc<Notifier>,
}

impl AppState {
    /// Wire up the state from its three independent parts. The notifier is
    /// derived, never constructed separately by callers.
    pub fn new(store: Arc<dyn Store>, config: Arc<ServerConfig>, ws_manager: Arc<WsManager>) -> Self {
        let notifier = Arc::new(Notifier::new(Arc::clone(&store), Arc::clone(&ws_manager)));
        Self {
            store,
            config,
            ws_manager,
            notifier,
        }
    }
}
