//! Transport implementations for the real-time channel.

pub mod memory;
pub mod websocket;

pub use memory::{InMemoryChannelHub, InMemoryChannelTransport};
pub use websocket::WebSocketTransport;
