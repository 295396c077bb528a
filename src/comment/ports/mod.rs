//! Ports for comment persistence and read markers.

use crate::auth::UserId;
use crate::comment::domain::{ClientNonce, Comment, CommentId, TaskId};
use crate::http::HttpError;
use async_trait::async_trait;

/// Result type for comment API operations.
pub type CommentApiResult<T> = Result<T, HttpError>;

/// Payload for posting one comment.
///
/// A file upload posts one draft per selected file, each carrying the
/// serialised descriptor as its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    /// Body text, or serialised file descriptor when `is_file`.
    pub body: String,
    /// Whether the body is a file descriptor.
    pub is_file: bool,
    /// Nonce correlating the optimistic insert with the channel echo.
    pub nonce: ClientNonce,
}

/// Backend acknowledgement of a posted comment.
///
/// The identifier is optional: some deployments return the stored comment,
/// others return an empty acknowledgement, in which case the sender falls
/// back to a local placeholder id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedComment {
    /// Server-assigned identifier, when the response body carried one.
    pub id: Option<CommentId>,
}

/// Port over the comment endpoints of the REST backend.
#[async_trait]
pub trait CommentApi: Send + Sync {
    /// Fetches the full comment history for a task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the fetch fails; there is no retry.
    async fn fetch_history(&self, task_id: &TaskId) -> CommentApiResult<Vec<Comment>>;

    /// Persists one comment and returns the acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the post fails.
    async fn post_comment(
        &self,
        task_id: &TaskId,
        author_id: &UserId,
        draft: &CommentDraft,
    ) -> CommentApiResult<PostedComment>;

    /// Persists the "last read" marker for a (task, user) pair.
    ///
    /// Callers treat this as fire-and-forget: failures are logged, never
    /// surfaced, and no local copy of the marker is kept.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the call fails.
    async fn mark_read(&self, task_id: &TaskId, user_id: &UserId) -> CommentApiResult<()>;
}
