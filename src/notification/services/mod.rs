//! Notification feed service.

pub mod feed;

pub use feed::NotificationFeed;
