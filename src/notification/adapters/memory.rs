//! In-memory [`NotificationApi`] for behavioural tests.

use crate::auth::UserId;
use crate::http::HttpError;
use crate::notification::domain::{Notification, NotificationId};
use crate::notification::ports::{NotificationApi, NotificationApiResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

/// Simulated notification backend.
#[derive(Default)]
pub struct InMemoryNotificationApi {
    lists: RwLock<HashMap<UserId, Vec<Notification>>>,
    marked: RwLock<Vec<NotificationId>>,
    fail_fetch: AtomicBool,
    fail_mark: AtomicBool,
}

impl InMemoryNotificationApi {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a user's stored notification list, newest first.
    pub fn seed(&self, user_id: UserId, notifications: Vec<Notification>) {
        if let Ok(mut guard) = self.lists.write() {
            guard.insert(user_id, notifications);
        }
    }

    /// Makes subsequent fetches fail.
    pub fn fail_fetch(&self, enabled: bool) {
        self.fail_fetch.store(enabled, Ordering::SeqCst);
    }

    /// Makes subsequent mark-read calls fail.
    pub fn fail_mark(&self, enabled: bool) {
        self.fail_mark.store(enabled, Ordering::SeqCst);
    }

    /// Returns every identifier flagged read so far, in order.
    #[must_use]
    pub fn recorded_marks(&self) -> Vec<NotificationId> {
        self.marked
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl NotificationApi for InMemoryNotificationApi {
    async fn fetch_all(&self, user_id: &UserId) -> NotificationApiResult<Vec<Notification>> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(HttpError::Status {
                status: 503,
                body: "notification store unavailable".to_owned(),
            });
        }
        Ok(self
            .lists
            .read()
            .ok()
            .and_then(|guard| guard.get(user_id).cloned())
            .unwrap_or_default())
    }

    async fn mark_read(&self, id: &NotificationId) -> NotificationApiResult<()> {
        if self.fail_mark.load(Ordering::SeqCst) {
            return Err(HttpError::Status {
                status: 500,
                body: "mark read failed".to_owned(),
            });
        }
        if let Ok(mut guard) = self.marked.write() {
            guard.push(id.clone());
        }
        Ok(())
    }
}
