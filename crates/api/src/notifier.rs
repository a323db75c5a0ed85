//! Durable notification creation plus best-effort realtime push.
//!
//! Every state change of interest to a user goes through [`Notifier`]: the
//! notification row is persisted first, then pushed to each of the user's
//! live WebSocket connections. Delivery problems never fail the triggering
//! operation.

use std::sync::Arc;

use axum::extract::ws::Message;
use serde_json::json;

use crewline_core::model::{Message as DirectMessage, NewNotification};
use crewline_core::store::Store;
use crewline_core::types::DbId;

use crate::ws::WsManager;

pub struct Notifier {
    store: Arc<dyn Store>,
    ws_manager: Arc<WsManager>,
}

impl Notifier {
    pub fn new(store: Arc<dyn Store>, ws_manager: Arc<WsManager>) -> Self {
        Self { store, ws_manager }
    }

    /// Persist a notification row, then push `{"type": "notification"}` to
    /// every live connection of the recipient.
    ///
    /// A persistence or delivery failure is logged and swallowed: the
    /// operation that triggered the notification has already committed and
    /// must not be failed retroactively.
    pub async fn notify(&self, new: NewNotification) {
        let user_id = new.user_id;
        let notification = match self.store.create_notification(new).await {
            Ok(n) => n,
            Err(err) => {
                tracing::warn!(user_id = %user_id, error = %err, "Failed to persist notification");
                return;
            }
        };

        let payload = json!({
            "type": "notification",
            "notification": notification,
        });
        self.push(user_id, &payload).await;
    }

    /// Push `{"type": "new_message", "message": ...}` to both ends of a
    /// direct message so every open tab of sender and recipient updates.
    pub async fn push_message(&self, message: &DirectMessage) {
        let payload = json!({
            "type": "new_message",
            "message": message,
        });
        self.push(message.recipient_id, &payload).await;
        self.push(message.sender_id, &payload).await;
    }

    /// Serialize and send a payload to all of a user's connections. No
    /// connections is not an error; the durable row is the source of truth.
    async fn push(&self, user_id: DbId, payload: &serde_json::Value) {
        let text = match serde_json::to_string(payload) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(error = %err, "Failed to serialize push payload");
                return;
            }
        };
        let sent = self
            .ws_manager
            .send_to_user(user_id, Message::Text(text.into()))
            .await;
        tracing::debug!(user_id = %user_id, sent, "Realtime push");
    }
}
