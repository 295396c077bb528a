//! The Comment aggregate and its file-attachment payload.

use super::{ClientNonce, CommentId, TaskId};
use crate::auth::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Comment author reference: identifier plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    id: UserId,
    display_name: String,
}

impl Author {
    /// Creates an author reference.
    #[must_use]
    pub fn new(id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }

    /// Returns the author's user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the author's display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Descriptor for an uploaded file carried in a comment body.
///
/// When a comment's `is_file` flag is set, its body is this descriptor
/// serialised as JSON rather than free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    /// Original file name shown as the link text.
    pub file_name: String,
    /// Download URL issued by the upload widget.
    pub url: String,
    /// MIME type, when the upload widget reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Size in bytes, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

/// Renderable view of a comment body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayContent<'a> {
    /// Free-text body, or the raw body of a file comment whose descriptor
    /// failed to parse.
    Text(&'a str),
    /// Parsed file descriptor.
    File(FileDescriptor),
}

/// A single comment in a task's thread.
///
/// Comments are immutable once created: the thread only ever appends.
/// Read/unread status is tracked out-of-band per (task, user) pair, never
/// on the comment itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    author: Author,
    body: String,
    is_file: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nonce: Option<ClientNonce>,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Reconstructs a comment from wire data (history fetch or channel
    /// delivery).
    #[must_use]
    pub fn from_wire(
        id: CommentId,
        task_id: TaskId,
        author: Author,
        body: impl Into<String>,
        is_file: bool,
        nonce: Option<ClientNonce>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task_id,
            author,
            body: body.into(),
            is_file,
            nonce,
            created_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> &CommentId {
        &self.id
    }

    /// Returns the owning task's identifier.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the author reference.
    #[must_use]
    pub const fn author(&self) -> &Author {
        &self.author
    }

    /// Returns the raw body string.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns whether the body is a file descriptor.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        self.is_file
    }

    /// Returns the client nonce, when the comment originated from this or
    /// another live client session.
    #[must_use]
    pub const fn nonce(&self) -> Option<ClientNonce> {
        self.nonce
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the renderable body.
    ///
    /// File comments whose descriptor JSON fails to parse are logged and
    /// fall back to the raw body text.
    #[must_use]
    pub fn display_content(&self) -> DisplayContent<'_> {
        if !self.is_file {
            return DisplayContent::Text(&self.body);
        }
        match serde_json::from_str::<FileDescriptor>(&self.body) {
            Ok(descriptor) => DisplayContent::File(descriptor),
            Err(error) => {
                warn!(comment_id = %self.id, %error, "unparseable file descriptor; showing raw body");
                DisplayContent::Text(&self.body)
            }
        }
    }
}
