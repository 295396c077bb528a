//! Behavioural integration tests for the notification badge fed by live
//! channel pushes.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use campanile::auth::UserId;
use campanile::channel::adapters::memory::InMemoryChannelHub;
use campanile::channel::{ChannelClient, NotificationEnvelope, ServerEvent};
use campanile::notification::adapters::memory::InMemoryNotificationApi;
use campanile::notification::{Notification, NotificationFeed, NotificationId};
use std::sync::Arc;

#[tokio::test]
async fn badge_tracks_pushes_and_reads_across_the_channel() {
    let user = UserId::new("u-42");
    let api = Arc::new(InMemoryNotificationApi::new());
    api.seed(
        user.clone(),
        vec![Notification::new(
            NotificationId::new("n-stored"),
            "Your offer letter is ready",
            false,
        )],
    );

    let hub = InMemoryChannelHub::new();
    let channel = ChannelClient::new(Arc::new(hub.register()));
    channel.connect().await.expect("channel connects");
    channel.setup(user.clone()).await.expect("setup emits");
    let mut inbound = channel.subscribe();

    let feed = NotificationFeed::open(Arc::clone(&api), user.clone()).await;
    assert_eq!(feed.unread_count(), 1);

    // The backend pushes one notification for this user and one for
    // somebody else; only the first may move the badge.
    hub.inject(&ServerEvent::Notification(NotificationEnvelope {
        id: NotificationId::new("n-live"),
        user_id: user.clone(),
        message: "A new comment mentions you".to_owned(),
    }));
    hub.inject(&ServerEvent::Notification(NotificationEnvelope {
        id: NotificationId::new("n-foreign"),
        user_id: UserId::new("u-other"),
        message: "Not yours".to_owned(),
    }));

    while let Ok(event) = inbound.try_recv() {
        feed.handle_event(&event);
    }
    assert_eq!(feed.unread_count(), 2);
    assert_eq!(feed.items().len(), 2);

    feed.mark_as_read(&NotificationId::new("n-live")).await;
    feed.mark_as_read(&NotificationId::new("n-stored")).await;
    assert_eq!(feed.unread_count(), 0);
    assert_eq!(api.recorded_marks().len(), 2);

    // Re-reading either is a no-op; the badge never goes negative.
    feed.mark_as_read(&NotificationId::new("n-live")).await;
    assert_eq!(feed.unread_count(), 0);
    assert_eq!(api.recorded_marks().len(), 2);
}
