//! The notification badge and dropdown feed.

use crate::auth::UserId;
use crate::channel::ServerEvent;
use crate::notification::domain::{Notification, NotificationId};
use crate::notification::ports::NotificationApi;
use std::sync::{Arc, RwLock};
use tracing::warn;

struct FeedState {
    items: Vec<Notification>,
    unread: usize,
}

/// Feed of the signed-in user's notifications.
///
/// Opens with a bulk fetch, then consumes channel pushes. The unread
/// counter is the count of unread entries at fetch time, incremented per
/// push and decremented per successful mark-as-read, clamped at zero.
///
/// HTTP failures are logged and otherwise swallowed: the list and counter
/// simply do not change, and the next open self-corrects.
pub struct NotificationFeed<A>
where
    A: NotificationApi,
{
    api: Arc<A>,
    user_id: UserId,
    state: RwLock<FeedState>,
}

impl<A> NotificationFeed<A>
where
    A: NotificationApi,
{
    /// Opens the feed for a known user, fetching the stored list.
    ///
    /// A failed fetch logs and opens the feed empty rather than failing
    /// the mount.
    pub async fn open(api: Arc<A>, user_id: UserId) -> Self {
        let items = match api.fetch_all(&user_id).await {
            Ok(items) => items,
            Err(error) => {
                warn!(user_id = %user_id, %error, "notification fetch failed; feed opens empty");
                Vec::new()
            }
        };
        let unread = items.iter().filter(|n| !n.is_read()).count();
        Self {
            api,
            user_id,
            state: RwLock::new(FeedState { items, unread }),
        }
    }

    /// Applies one inbound channel event, prepending notifications
    /// addressed to this user.
    pub fn handle_event(&self, event: &ServerEvent) {
        let ServerEvent::Notification(envelope) = event else {
            return;
        };
        if envelope.user_id != self.user_id {
            return;
        }
        if let Ok(mut guard) = self.state.write() {
            guard
                .items
                .insert(0, envelope.clone().into_notification());
            guard.unread = guard.unread.saturating_add(1);
        }
    }

    /// Flags one notification read, then updates the local list and
    /// counter. Marking an already-read entry is a no-op.
    pub async fn mark_as_read(&self, id: &NotificationId) {
        let already_read = self
            .state
            .read()
            .map(|guard| {
                guard
                    .items
                    .iter()
                    .find(|n| n.id() == id)
                    .is_none_or(Notification::is_read)
            })
            .unwrap_or(true);
        if already_read {
            return;
        }

        if let Err(error) = self.api.mark_read(id).await {
            warn!(notification_id = %id, %error, "mark as read failed; leaving badge unchanged");
            return;
        }

        if let Ok(mut guard) = self.state.write() {
            if let Some(item) = guard.items.iter_mut().find(|n| n.id() == id) {
                if !item.is_read() {
                    item.mark_read();
                    guard.unread = guard.unread.saturating_sub(1);
                }
            }
        }
    }

    /// Returns the unread counter shown on the badge.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.state.read().map(|guard| guard.unread).unwrap_or(0)
    }

    /// Returns the feed entries, newest first.
    #[must_use]
    pub fn items(&self) -> Vec<Notification> {
        self.state
            .read()
            .map(|guard| guard.items.clone())
            .unwrap_or_default()
    }
}
