//! Campanile: client core for the student application portal.
//!
//! This crate models the portal's session engine: the authenticated HTTP
//! layer, the real-time channel, per-task comment synchronization, the
//! notification feed, and the multi-step application wizard. Rendering is
//! out of scope; user-visible effects surface as typed events the
//! embedding UI consumes.
//!
//! # Architecture
//!
//! Campanile follows hexagonal architecture principles:
//!
//! - **Domain**: Pure state and rules with no transport dependencies
//! - **Ports**: Abstract trait interfaces for backends and transports
//! - **Adapters**: Concrete implementations of ports (REST, websocket,
//!   in-memory)
//!
//! # Modules
//!
//! - [`auth`]: Typed session, roles, and the access-token store
//! - [`http`]: Bearer-authenticated REST client with single-shot token
//!   refresh
//! - [`channel`]: Real-time channel client and event vocabulary
//! - [`comment`]: Per-task comment threads with live delivery
//! - [`notification`]: Notification badge and feed
//! - [`wizard`]: Nine-step application wizard

pub mod auth;
pub mod channel;
pub mod comment;
pub mod config;
pub mod http;
pub mod notification;
pub mod wizard;
