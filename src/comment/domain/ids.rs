//! Identifier newtypes for tasks and comments.
//!
//! Task and comment identifiers are assigned server-side and opaque to the
//! client, so they wrap strings rather than UUIDs. The client nonce is
//! generated locally and rides along with a send so the server echo can be
//! recognised as a duplicate of an optimistic insert.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a task identifier from a server-assigned value.
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

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a comment within a task's thread.
///
/// Normally server-assigned; when a send response carries no identifier,
/// the optimistic insert uses a random local placeholder instead. The two
/// are indistinguishable once constructed, which is why thread insertion
/// also checks the client nonce (see [`super::CommentThread`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    /// Creates a comment identifier from a server-assigned value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Creates a random local placeholder identifier.
    #[must_use]
    pub fn placeholder() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client-generated nonce correlating an optimistic insert with its echo.
///
/// Included in the send payload and preserved by the channel broadcast, so
/// the sender can drop its own echo even when the echoed comment carries a
/// different (server-assigned) identifier than the local placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientNonce(Uuid);

impl ClientNonce {
    /// Creates a new random nonce.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a nonce from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ClientNonce {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientNonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
