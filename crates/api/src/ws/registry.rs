use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use hrsadmin_core::types::Timestamp;
use serde_json::json;
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single WebSocket connection.
pub struct WsConnection {
    /// Email this connection identified as, if any. Anonymous connections
    /// receive roster broadcasts but never appear in the roster themselves.
    pub identity: Option<String>,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Maps plus the invariant between them: every roster value is a key in
/// `connections`, and at most one roster entry exists per email.
struct Inner {
    /// All live connections, keyed by connection id.
    connections: HashMap<String, WsConnection>,
    /// Online roster: email to the connection currently representing it.
    roster: HashMap<String, String>,
}

/// In-memory presence registry over all active WebSocket connections.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application. Every roster mutation is followed by a
/// broadcast of the full roster to all connections (identified or not),
/// performed under the same write lock so broadcasts never go out of order.
pub struct PresenceRegistry {
    inner: RwLock<Inner>,
}

impl PresenceRegistry {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                connections: HashMap::new(),
                roster: HashMap::new(),
            }),
        }
    }

    /// Register a new connection, optionally identified by email.
    ///
    /// An identified connection replaces any previous roster entry for the
    /// same email (reconnects win). Registration triggers a roster broadcast
    /// to every connection, including the one just added.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(
        &self,
        conn_id: String,
        identity: Option<String>,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            identity: identity.clone(),
            sender: tx,
            connected_at: chrono::Utc::now(),
        };

        let mut inner = self.inner.write().await;
        inner.connections.insert(conn_id.clone(), conn);
        if let Some(email) = identity {
            inner.roster.insert(email, conn_id);
            broadcast_roster(&inner);
        }
        rx
    }

    /// Remove a connection by its ID.
    ///
    /// If the connection was identified, its email leaves the roster even
    /// when a newer connection has since claimed it: closing either channel
    /// marks the user offline. A roster broadcast follows the removal.
    pub async fn remove(&self, conn_id: &str) {
        let mut inner = self.inner.write().await;
        let removed = inner.connections.remove(conn_id);
        if let Some(WsConnection {
            identity: Some(email),
            ..
        }) = removed
        {
            inner.roster.remove(&email);
            broadcast_roster(&inner);
        }
    }

    /// Return the current roster as a sorted list of emails.
    pub async fn roster(&self) -> Vec<String> {
        let inner = self.inner.read().await;
        let mut emails: Vec<String> = inner.roster.keys().cloned().collect();
        emails.sort();
        emails
    }

    /// Whether the given email currently has a roster entry.
    pub async fn is_online(&self, email: &str) -> bool {
        self.inner.read().await.roster.contains_key(email)
    }

    /// Broadcast a message to all connected clients.
    ///
    /// Connections whose send channels are closed are silently skipped
    /// (they will be cleaned up on their next receive loop iteration).
    pub async fn broadcast(&self, message: Message) {
        let inner = self.inner.read().await;
        for conn in inner.connections.values() {
            let _ = conn.sender.send(message.clone());
        }
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.inner.read().await.connections.len()
    }

    /// Send a Close frame to every connection, then clear both maps.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut inner = self.inner.write().await;
        let count = inner.connections.len();
        for conn in inner.connections.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        inner.connections.clear();
        inner.roster.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }

    /// Send a Ping frame to every connected client.
    ///
    /// Used by the heartbeat task to keep connections alive and detect
    /// stale ones.
    pub async fn ping_all(&self) {
        let inner = self.inner.read().await;
        for conn in inner.connections.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for PresenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Send the full roster to every connection as an `online-users-update` frame.
///
/// Called with the write lock held so the broadcast always reflects the
/// mutation that triggered it.
fn broadcast_roster(inner: &Inner) {
    let mut emails: Vec<&String> = inner.roster.keys().collect();
    emails.sort();

    let users: Vec<_> = emails.into_iter().map(|e| json!({ "email": e })).collect();
    let payload = json!({
        "type": "online-users-update",
        "users": users,
    });
    let message = Message::Text(payload.to_string().into());

    for conn in inner.connections.values() {
        let _ = conn.sender.send(message.clone());
    }
}
