//! REST adapter for the comment endpoints.

use crate::auth::UserId;
use crate::comment::domain::{Author, ClientNonce, Comment, CommentId, TaskId};
use crate::comment::ports::{CommentApi, CommentApiResult, CommentDraft, PostedComment};
use crate::http::{ApiClient, HttpError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

/// Wire shape of a stored comment as the backend returns it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentRecord {
    #[serde(rename = "_id")]
    id: CommentId,
    task_id: TaskId,
    author: AuthorRecord,
    content: String,
    #[serde(default)]
    is_file: bool,
    #[serde(default)]
    nonce: Option<ClientNonce>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct AuthorRecord {
    #[serde(rename = "_id")]
    id: UserId,
    name: String,
}

impl CommentRecord {
    fn into_comment(self) -> Comment {
        Comment::from_wire(
            self.id,
            self.task_id,
            Author::new(self.author.id, self.author.name),
            self.content,
            self.is_file,
            self.nonce,
            self.created_at,
        )
    }
}

/// Wire shape of a post acknowledgement; all fields optional because some
/// deployments answer with an empty body.
#[derive(Debug, Default, Deserialize)]
struct PostAck {
    #[serde(rename = "_id", default)]
    id: Option<CommentId>,
}

/// [`CommentApi`] over the shared [`ApiClient`].
#[derive(Clone)]
pub struct RestCommentApi {
    client: ApiClient,
}

impl RestCommentApi {
    /// Creates the adapter over the shared client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CommentApi for RestCommentApi {
    async fn fetch_history(&self, task_id: &TaskId) -> CommentApiResult<Vec<Comment>> {
        let records: Vec<CommentRecord> = self
            .client
            .get_json(&format!("/tasks/{task_id}/comments"))
            .await?;
        Ok(records.into_iter().map(CommentRecord::into_comment).collect())
    }

    async fn post_comment(
        &self,
        task_id: &TaskId,
        author_id: &UserId,
        draft: &CommentDraft,
    ) -> CommentApiResult<PostedComment> {
        let body = json!({
            "author": author_id,
            "content": draft.body,
            "isFile": draft.is_file,
            "nonce": draft.nonce,
        });
        // An empty or non-JSON acknowledgement body is valid: it simply
        // means the sender falls back to a placeholder identifier.
        let ack = match self
            .client
            .post_json::<PostAck>(&format!("/tasks/{task_id}/comments"), body)
            .await
        {
            Ok(ack) => ack,
            Err(HttpError::Decode(_)) => PostAck::default(),
            Err(other) => return Err(other),
        };
        Ok(PostedComment { id: ack.id })
    }

    async fn mark_read(&self, task_id: &TaskId, user_id: &UserId) -> CommentApiResult<()> {
        self.client
            .post(
                &format!("/tasks/{task_id}/comments/read"),
                json!({ "user": user_id }),
            )
            .await
    }
}
