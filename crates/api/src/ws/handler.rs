use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::state::AppState;
use crate::ws::registry::PresenceRegistry;

/// Query parameters accepted by the presence WebSocket endpoint.
#[derive(Debug, Deserialize)]
pub struct PresenceParams {
    /// Email to register in the roster. Omitted or empty means the
    /// connection is anonymous: it receives broadcasts but is never listed.
    pub email: Option<String>,
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// After the upgrade the connection is registered with [`PresenceRegistry`]
/// and managed by two tasks (sender + receiver).
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<PresenceParams>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let identity = params
        .email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty());
    ws.on_upgrade(move |socket| handle_socket(socket, state.presence, identity))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with the presence registry.
///   2. Spawns a sender task that forwards messages from the registry channel.
///   3. Processes inbound messages on the current task.
///   4. Cleans up on disconnect.
async fn handle_socket(socket: WebSocket, presence: Arc<PresenceRegistry>, identity: Option<String>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, identity = ?identity, "WebSocket connected");

    // Register and get the receiver for outbound messages.
    let mut rx = presence.add(conn_id.clone(), identity).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: process inbound messages.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_msg) => {
                // Presence is driven entirely by connect/disconnect; inbound
                // frames carry nothing actionable.
            }
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: remove connection (broadcasts the updated roster) and abort
    // the sender task.
    presence.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}
