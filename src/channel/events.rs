//! Shared event contract for the real-time channel.
//!
//! Wire frames are JSON objects of the form `{"event": <name>, "data":
//! <payload>}`, with the event names the socket backend routes on
//! (`"setup"`, `"join chat"`, `"new message"`, ...). Envelopes carry the
//! minimum the receiving side needs to rebuild a domain object without a
//! follow-up fetch.

use crate::auth::UserId;
use crate::comment::domain::{Author, ClientNonce, Comment, CommentId, TaskId};
use crate::notification::domain::{Notification, NotificationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire form of a comment broadcast to a task room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentEnvelope {
    /// Comment identifier (server-assigned, or the sender's placeholder).
    pub id: CommentId,
    /// Room the comment belongs to.
    pub task_id: TaskId,
    /// Author's user identifier.
    pub author_id: UserId,
    /// Author's display name, so receivers render without a lookup.
    pub author_name: String,
    /// Body text or serialised file descriptor.
    pub body: String,
    /// Whether the body is a file descriptor.
    pub is_file: bool,
    /// Sender's nonce, preserved by the backend echo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<ClientNonce>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl CommentEnvelope {
    /// Builds the envelope for broadcasting a locally created comment.
    #[must_use]
    pub fn from_comment(comment: &Comment) -> Self {
        Self {
            id: comment.id().clone(),
            task_id: comment.task_id().clone(),
            author_id: comment.author().id().clone(),
            author_name: comment.author().display_name().to_owned(),
            body: comment.body().to_owned(),
            is_file: comment.is_file(),
            nonce: comment.nonce(),
            created_at: comment.created_at(),
        }
    }

    /// Rebuilds the domain comment on the receiving side.
    #[must_use]
    pub fn into_comment(self) -> Comment {
        Comment::from_wire(
            self.id,
            self.task_id.clone(),
            Author::new(self.author_id, self.author_name),
            self.body,
            self.is_file,
            self.nonce,
            self.created_at,
        )
    }
}

/// Wire form of a notification push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEnvelope {
    /// Notification identifier.
    pub id: NotificationId,
    /// Recipient; listeners filter to their own user id.
    pub user_id: UserId,
    /// Notification text.
    pub message: String,
}

impl NotificationEnvelope {
    /// Rebuilds the domain notification; pushes always arrive unread.
    #[must_use]
    pub fn into_notification(self) -> Notification {
        Notification::new(self.id, self.message, false)
    }
}

/// Events emitted by this client towards the socket backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    /// Announces the signed-in user so user-scoped events reach this
    /// connection. Must be sent once post-login.
    #[serde(rename = "setup")]
    Setup {
        /// The signed-in user's identifier.
        #[serde(rename = "_id")]
        user_id: UserId,
    },
    /// Joins a task's room. Idempotent server-side.
    #[serde(rename = "join chat")]
    JoinChat(TaskId),
    /// Signals that the user is typing in a task's composer.
    #[serde(rename = "typing")]
    Typing(TaskId),
    /// Withdraws the typing indicator.
    #[serde(rename = "stop typing")]
    StopTyping(TaskId),
    /// Broadcasts a newly sent comment to the task room.
    #[serde(rename = "new message")]
    NewMessage(CommentEnvelope),
}

/// Events delivered by the socket backend to this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// Connection acknowledged.
    #[serde(rename = "connected")]
    Connected,
    /// A comment reached one of the rooms this connection joined.
    #[serde(rename = "message received")]
    MessageReceived(CommentEnvelope),
    /// A notification for the user announced via `setup`.
    #[serde(rename = "notification")]
    Notification(NotificationEnvelope),
    /// Another viewer started typing in a task room.
    #[serde(rename = "typing")]
    TypingStarted(TaskId),
    /// Another viewer stopped typing.
    #[serde(rename = "stop typing")]
    TypingStopped(TaskId),
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::expect_used,
        reason = "Test code uses expect for assertion clarity"
    )]

    use super::{ClientEvent, ServerEvent};
    use crate::auth::UserId;
    use crate::comment::domain::TaskId;
    use serde_json::json;

    #[test]
    fn setup_event_uses_backend_field_name() {
        let event = ClientEvent::Setup {
            user_id: UserId::new("u-9"),
        };
        let value = serde_json::to_value(&event).expect("serialises");
        assert_eq!(value, json!({"event": "setup", "data": {"_id": "u-9"}}));
    }

    #[test]
    fn room_events_use_spaced_names() {
        let value =
            serde_json::to_value(ClientEvent::JoinChat(TaskId::new("t-1"))).expect("serialises");
        assert_eq!(value, json!({"event": "join chat", "data": "t-1"}));
    }

    #[test]
    fn server_event_round_trips() {
        let frame = json!({"event": "typing", "data": "t-2"});
        let event: ServerEvent = serde_json::from_value(frame).expect("deserialises");
        assert_eq!(event, ServerEvent::TypingStarted(TaskId::new("t-2")));
    }
}
