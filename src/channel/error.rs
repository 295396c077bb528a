//! Error types for the real-time channel.

use std::sync::Arc;
use thiserror::Error;

/// Errors produced by the channel client and its transports.
#[derive(Debug, Clone, Error)]
pub enum ChannelError {
    /// An operation was attempted before `connect()` (or after
    /// `disconnect()`).
    #[error("channel is not connected")]
    NotConnected,

    /// The underlying transport failed.
    #[error("channel transport error: {0}")]
    Transport(#[source] Arc<dyn std::error::Error + Send + Sync>),

    /// An event could not be encoded for the wire.
    #[error("event encode error: {0}")]
    Encode(String),
}

impl ChannelError {
    /// Wraps a transport-level error.
    #[must_use]
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
