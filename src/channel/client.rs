//! The channel client owned by the application root.

use crate::auth::UserId;
use crate::channel::{
    error::ChannelError,
    events::{ClientEvent, CommentEnvelope, ServerEvent},
    transport::ChannelTransport,
};
use crate::comment::domain::TaskId;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use tracing::debug;

/// Dependency-injected handle to the single real-time connection.
///
/// Constructed once at application start, connected after login, and
/// shared with every consumer via `Arc`. Room joins are tracked so
/// repeated joins from remounting views stay idempotent on this side as
/// well as on the backend.
pub struct ChannelClient {
    transport: Arc<dyn ChannelTransport>,
    joined_rooms: RwLock<HashSet<TaskId>>,
    connected: RwLock<bool>,
}

impl ChannelClient {
    /// Creates a client over the given transport. Does not connect.
    #[must_use]
    pub fn new(transport: Arc<dyn ChannelTransport>) -> Self {
        Self {
            transport,
            joined_rooms: RwLock::new(HashSet::new()),
            connected: RwLock::new(false),
        }
    }

    /// Establishes the connection.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Transport`] when the endpoint cannot be
    /// reached.
    pub async fn connect(&self) -> Result<(), ChannelError> {
        self.transport.connect().await?;
        if let Ok(mut guard) = self.connected.write() {
            *guard = true;
        }
        Ok(())
    }

    /// Tears the connection down and forgets joined rooms.
    pub async fn disconnect(&self) {
        self.transport.disconnect().await;
        if let Ok(mut guard) = self.connected.write() {
            *guard = false;
        }
        if let Ok(mut guard) = self.joined_rooms.write() {
            guard.clear();
        }
    }

    /// Returns whether `connect()` has succeeded and `disconnect()` has
    /// not been called since.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.read().map(|guard| *guard).unwrap_or(false)
    }

    /// Announces the signed-in user so user-scoped events are routed to
    /// this connection. Must be called once a user identity is known.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError`] when the emit fails.
    pub async fn setup(&self, user_id: UserId) -> Result<(), ChannelError> {
        self.transport.send(ClientEvent::Setup { user_id }).await
    }

    /// Joins a task room. Harmless when already joined.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError`] when the emit fails.
    pub async fn join_chat(&self, task_id: &TaskId) -> Result<(), ChannelError> {
        let already_joined = self
            .joined_rooms
            .read()
            .map(|guard| guard.contains(task_id))
            .unwrap_or(false);
        if already_joined {
            debug!(task_id = %task_id, "room already joined; skipping emit");
            return Ok(());
        }

        self.transport
            .send(ClientEvent::JoinChat(task_id.clone()))
            .await?;
        if let Ok(mut guard) = self.joined_rooms.write() {
            guard.insert(task_id.clone());
        }
        Ok(())
    }

    /// Emits a typing signal for a task room.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError`] when the emit fails.
    pub async fn typing(&self, task_id: &TaskId) -> Result<(), ChannelError> {
        self.transport
            .send(ClientEvent::Typing(task_id.clone()))
            .await
    }

    /// Withdraws the typing signal for a task room.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError`] when the emit fails.
    pub async fn stop_typing(&self, task_id: &TaskId) -> Result<(), ChannelError> {
        self.transport
            .send(ClientEvent::StopTyping(task_id.clone()))
            .await
    }

    /// Broadcasts a newly sent comment to its task room.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError`] when the emit fails.
    pub async fn new_message(&self, envelope: CommentEnvelope) -> Result<(), ChannelError> {
        self.transport.send(ClientEvent::NewMessage(envelope)).await
    }

    /// Returns a receiver over all inbound events.
    ///
    /// Consumers filter to their own entity id inside the handler; there
    /// is no per-room scoping at the subscription level.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.transport.subscribe()
    }
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::expect_used,
        reason = "Test code uses expect for assertion clarity"
    )]

    use super::ChannelClient;
    use crate::channel::adapters::memory::InMemoryChannelHub;
    use crate::channel::events::ClientEvent;
    use crate::comment::domain::TaskId;
    use std::sync::Arc;

    #[tokio::test]
    async fn join_chat_is_idempotent() {
        let hub = InMemoryChannelHub::new();
        let transport = hub.register();
        let client = ChannelClient::new(Arc::new(transport.clone()));
        client.connect().await.expect("connect");

        let task = TaskId::new("t-1");
        client.join_chat(&task).await.expect("first join");
        client.join_chat(&task).await.expect("second join");

        let joins = transport
            .sent_events()
            .into_iter()
            .filter(|e| matches!(e, ClientEvent::JoinChat(_)))
            .count();
        assert_eq!(joins, 1);
    }

    #[tokio::test]
    async fn disconnect_forgets_joined_rooms() {
        let hub = InMemoryChannelHub::new();
        let transport = hub.register();
        let client = ChannelClient::new(Arc::new(transport.clone()));
        client.connect().await.expect("connect");

        let task = TaskId::new("t-2");
        client.join_chat(&task).await.expect("join");
        client.disconnect().await;
        assert!(!client.is_connected());

        client.connect().await.expect("reconnect");
        client.join_chat(&task).await.expect("rejoin");
        let joins = transport
            .sent_events()
            .into_iter()
            .filter(|e| matches!(e, ClientEvent::JoinChat(_)))
            .count();
        assert_eq!(joins, 2);
    }

    #[tokio::test]
    async fn send_before_connect_is_rejected() {
        let hub = InMemoryChannelHub::new();
        let transport = hub.register();
        let client = ChannelClient::new(Arc::new(transport));
        let err = client
            .typing(&TaskId::new("t-3"))
            .await
            .expect_err("not connected");
        assert!(matches!(err, crate::channel::ChannelError::NotConnected));
    }
}
