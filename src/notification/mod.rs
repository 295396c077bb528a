//! User-scoped notification badge and feed.
//!
//! Notifications are created server-side and reach the client two ways: a
//! bulk fetch when the feed opens, and live pushes over the real-time
//! channel. The feed keeps the unread counter consistent with the list:
//! each push increments it, each successful mark-as-read decrements it,
//! clamped at zero.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

pub use domain::{Notification, NotificationId};
pub use services::NotificationFeed;
