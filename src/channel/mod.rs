//! Real-time channel client.
//!
//! One persistent connection per running portal instance, joined to
//! per-entity rooms and carrying the typed event vocabulary in
//! [`events`]. The [`client::ChannelClient`] is an explicitly constructed
//! object with a `connect()`/`disconnect()` lifecycle, shared by consumers
//! via `Arc`; there is no ambient global connection handle.
//!
//! This layer deliberately has no retry or backoff: a dropped connection
//! silently stops delivering events until the transport itself recovers.

pub mod adapters;
pub mod client;
pub mod error;
pub mod events;
pub mod transport;

pub use client::ChannelClient;
pub use error::ChannelError;
pub use events::{ClientEvent, CommentEnvelope, NotificationEnvelope, ServerEvent};
pub use transport::ChannelTransport;
