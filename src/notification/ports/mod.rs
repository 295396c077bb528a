//! Port over the notification endpoints of the REST backend.

use crate::auth::UserId;
use crate::http::HttpError;
use crate::notification::domain::{Notification, NotificationId};
use async_trait::async_trait;

/// Result type for notification API operations.
pub type NotificationApiResult<T> = Result<T, HttpError>;

/// Backend operations for the notification feed.
#[async_trait]
pub trait NotificationApi: Send + Sync {
    /// Fetches the user's full notification list, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the fetch fails.
    async fn fetch_all(&self, user_id: &UserId) -> NotificationApiResult<Vec<Notification>>;

    /// Flags a single notification as read. There is no batch variant.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the update fails.
    async fn mark_read(&self, id: &NotificationId) -> NotificationApiResult<()>;
}
