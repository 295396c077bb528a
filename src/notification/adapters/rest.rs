//! REST adapter for the notification endpoints.

use crate::auth::UserId;
use crate::http::ApiClient;
use crate::notification::domain::{Notification, NotificationId};
use crate::notification::ports::{NotificationApi, NotificationApiResult};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

/// Wire shape of a stored notification.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotificationRecord {
    #[serde(rename = "_id")]
    id: NotificationId,
    message: String,
    #[serde(default)]
    is_read: bool,
}

impl NotificationRecord {
    fn into_notification(self) -> Notification {
        Notification::new(self.id, self.message, self.is_read)
    }
}

/// [`NotificationApi`] over the shared [`ApiClient`].
#[derive(Clone)]
pub struct RestNotificationApi {
    client: ApiClient,
}

impl RestNotificationApi {
    /// Creates the adapter over the shared client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationApi for RestNotificationApi {
    async fn fetch_all(&self, user_id: &UserId) -> NotificationApiResult<Vec<Notification>> {
        let records: Vec<NotificationRecord> = self
            .client
            .get_json(&format!("/users/{user_id}/notifications"))
            .await?;
        Ok(records
            .into_iter()
            .map(NotificationRecord::into_notification)
            .collect())
    }

    async fn mark_read(&self, id: &NotificationId) -> NotificationApiResult<()> {
        self.client
            .patch(&format!("/notifications/{id}"), json!({ "isRead": true }))
            .await
    }
}
