//! In-memory [`CommentApi`] for behavioural tests.

use crate::auth::UserId;
use crate::comment::domain::{Author, Comment, CommentId, TaskId};
use crate::comment::ports::{CommentApi, CommentApiResult, CommentDraft, PostedComment};
use crate::http::HttpError;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;

/// Simulated comment backend.
///
/// Seeded histories play the stored thread; posts are appended with
/// generated server ids (unless configured to acknowledge without one,
/// reproducing backends whose post response carries no body). Read-marker
/// calls are recorded for assertion.
#[derive(Default)]
pub struct InMemoryCommentApi {
    histories: RwLock<HashMap<TaskId, Vec<Comment>>>,
    read_markers: RwLock<Vec<(TaskId, UserId)>>,
    next_id: AtomicU64,
    ack_without_id: AtomicBool,
    fail_mark_read: AtomicBool,
    author_names: RwLock<HashMap<UserId, String>>,
}

impl InMemoryCommentApi {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the stored history for a task, oldest first.
    pub fn seed_history(&self, task_id: TaskId, comments: Vec<Comment>) {
        if let Ok(mut guard) = self.histories.write() {
            guard.insert(task_id, comments);
        }
    }

    /// Registers the display name to attach to posts from a user.
    pub fn register_author(&self, user_id: UserId, name: impl Into<String>) {
        if let Ok(mut guard) = self.author_names.write() {
            guard.insert(user_id, name.into());
        }
    }

    /// Makes subsequent post acknowledgements omit the server id, forcing
    /// senders onto placeholder identifiers.
    pub fn acknowledge_without_id(&self, enabled: bool) {
        self.ack_without_id.store(enabled, Ordering::SeqCst);
    }

    /// Makes subsequent read-marker calls fail, for testing the
    /// fire-and-forget policy.
    pub fn fail_mark_read(&self, enabled: bool) {
        self.fail_mark_read.store(enabled, Ordering::SeqCst);
    }

    /// Returns every recorded (task, user) read-marker call, in order.
    #[must_use]
    pub fn recorded_read_markers(&self) -> Vec<(TaskId, UserId)> {
        self.read_markers
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Returns the stored history for a task.
    #[must_use]
    pub fn stored_history(&self, task_id: &TaskId) -> Vec<Comment> {
        self.histories
            .read()
            .ok()
            .and_then(|guard| guard.get(task_id).cloned())
            .unwrap_or_default()
    }

    fn author_for(&self, user_id: &UserId) -> Author {
        let name = self
            .author_names
            .read()
            .ok()
            .and_then(|guard| guard.get(user_id).cloned())
            .unwrap_or_else(|| user_id.as_str().to_owned());
        Author::new(user_id.clone(), name)
    }
}

#[async_trait]
impl CommentApi for InMemoryCommentApi {
    async fn fetch_history(&self, task_id: &TaskId) -> CommentApiResult<Vec<Comment>> {
        Ok(self.stored_history(task_id))
    }

    async fn post_comment(
        &self,
        task_id: &TaskId,
        author_id: &UserId,
        draft: &CommentDraft,
    ) -> CommentApiResult<PostedComment> {
        let sequence = self.next_id.fetch_add(1, Ordering::SeqCst);
        let id = CommentId::new(format!("srv-{sequence}"));
        let stored = Comment::from_wire(
            id.clone(),
            task_id.clone(),
            self.author_for(author_id),
            draft.body.clone(),
            draft.is_file,
            Some(draft.nonce),
            Utc::now(),
        );
        if let Ok(mut guard) = self.histories.write() {
            guard.entry(task_id.clone()).or_default().push(stored);
        }

        if self.ack_without_id.load(Ordering::SeqCst) {
            return Ok(PostedComment { id: None });
        }
        Ok(PostedComment { id: Some(id) })
    }

    async fn mark_read(&self, task_id: &TaskId, user_id: &UserId) -> CommentApiResult<()> {
        if self.fail_mark_read.load(Ordering::SeqCst) {
            return Err(HttpError::Status {
                status: 500,
                body: "read marker store unavailable".to_owned(),
            });
        }
        if let Ok(mut guard) = self.read_markers.write() {
            guard.push((task_id.clone(), user_id.clone()));
        }
        Ok(())
    }
}
