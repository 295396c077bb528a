//! Transport port for the real-time channel.

use crate::channel::{
    error::ChannelError,
    events::{ClientEvent, ServerEvent},
};
use async_trait::async_trait;
use tokio::sync::broadcast;

/// Port moving events between the client and the socket backend.
///
/// All subscribers share one inbound stream; per-entity filtering happens
/// in each consumer's handler, never at the transport. Implementations do
/// not retry: delivery stops silently while the underlying connection is
/// down.
#[async_trait]
pub trait ChannelTransport: Send + Sync {
    /// Establishes the connection. Called once at client `connect()`.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Transport`] when the endpoint cannot be
    /// reached.
    async fn connect(&self) -> Result<(), ChannelError>;

    /// Tears the connection down and stops the inbound pump.
    async fn disconnect(&self);

    /// Emits one event to the backend.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::NotConnected`] before `connect()` and
    /// [`ChannelError::Transport`] when the write fails.
    async fn send(&self, event: ClientEvent) -> Result<(), ChannelError>;

    /// Returns a receiver over all inbound events.
    ///
    /// Events delivered before the first subscription are dropped, which
    /// matches listener-attach semantics in the browser client.
    fn subscribe(&self) -> broadcast::Receiver<ServerEvent>;
}
