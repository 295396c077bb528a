//! Per-task comment threads with live delivery.
//!
//! The portal renders each task's discussion as a chat: history is fetched
//! over REST when the task opens, new comments arrive over the real-time
//! channel, and sends are inserted optimistically before the backend
//! confirms them. This module owns that synchronization: the
//! [`domain::CommentThread`] holds the full known history plus the
//! displayed suffix window, and [`services::CommentSyncService`] drives the
//! loading/live state machine, typing indicator, and read markers.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
