//! Notification domain types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a notification, assigned server-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    /// Creates a notification identifier from a server-assigned value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single notification entry.
///
/// Created server-side, never deleted client-side; the only mutation is
/// flipping the read flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    id: NotificationId,
    message: String,
    is_read: bool,
}

impl Notification {
    /// Creates a notification entry.
    #[must_use]
    pub fn new(id: NotificationId, message: impl Into<String>, is_read: bool) -> Self {
        Self {
            id,
            message: message.into(),
            is_read,
        }
    }

    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> &NotificationId {
        &self.id
    }

    /// Returns the notification text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns whether the notification has been read.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.is_read
    }

    /// Flips the read flag. Idempotent.
    pub const fn mark_read(&mut self) {
        self.is_read = true;
    }
}
