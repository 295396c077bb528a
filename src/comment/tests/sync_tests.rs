//! Behavioural tests for [`CommentSyncService`] against in-memory
//! adapters.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use crate::auth::{Role, Session, UserId};
use crate::channel::adapters::memory::InMemoryChannelHub;
use crate::channel::{ChannelClient, ChannelTransport, ClientEvent, ServerEvent};
use crate::comment::adapters::memory::InMemoryCommentApi;
use crate::comment::domain::{Author, Comment, CommentId, DisplayContent, FileDescriptor, TaskId};
use crate::comment::services::{CommentSyncError, CommentSyncService, UiEvent};
use crate::config::PortalConfig;
use chrono::{Duration, Utc};
use mockable::DefaultClock;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

type Service = CommentSyncService<InMemoryCommentApi, DefaultClock>;

struct Fixture {
    api: Arc<InMemoryCommentApi>,
    hub: InMemoryChannelHub,
    channel: Arc<ChannelClient>,
    session: Session,
    task: TaskId,
}

impl Fixture {
    async fn new() -> Self {
        let api = Arc::new(InMemoryCommentApi::new());
        let hub = InMemoryChannelHub::new();
        let channel = Arc::new(ChannelClient::new(Arc::new(hub.register())));
        channel.connect().await.expect("channel connects");
        let session = Session::new(UserId::new("u-a"), "Alice", Role::Staff);
        api.register_author(UserId::new("u-a"), "Alice");
        Self {
            api,
            hub,
            channel,
            session,
            task: TaskId::new("t-1"),
        }
    }

    fn stored(&self, id: &str, body: &str) -> Comment {
        Comment::from_wire(
            CommentId::new(id),
            self.task.clone(),
            Author::new(UserId::new("u-b"), "Bao"),
            body,
            false,
            None,
            Utc::now(),
        )
    }

    async fn open(&self) -> (Service, UnboundedReceiver<UiEvent>) {
        CommentSyncService::open(
            Arc::clone(&self.api),
            Arc::clone(&self.channel),
            Arc::new(DefaultClock),
            self.session.clone(),
            self.task.clone(),
            &PortalConfig::new("https://api.portal.test", "wss://rt.portal.test"),
        )
        .await
        .expect("view opens")
    }
}

fn foreign_envelope(task: &str) -> ServerEvent {
    ServerEvent::MessageReceived(crate::channel::CommentEnvelope {
        id: CommentId::new("other-1"),
        task_id: TaskId::new(task),
        author_id: UserId::new("u-c"),
        author_name: "Cleo".to_owned(),
        body: "elsewhere".to_owned(),
        is_file: false,
        nonce: None,
        created_at: Utc::now(),
    })
}

#[tokio::test]
async fn open_shows_most_recent_page_and_joins_room() {
    let fixture = Fixture::new().await;
    let history: Vec<Comment> = (0..120)
        .map(|i| fixture.stored(&format!("c-{i}"), "hi"))
        .collect();
    fixture.api.seed_history(fixture.task.clone(), history);

    let (service, _ui) = fixture.open().await;
    assert_eq!(service.history_len(), 120);
    assert_eq!(service.window_len(), 50);
    assert!(service.has_more());
}

#[tokio::test]
async fn load_more_reveals_previous_page_and_anchors_scroll() {
    let fixture = Fixture::new().await;
    let history: Vec<Comment> = (0..120)
        .map(|i| fixture.stored(&format!("c-{i}"), "hi"))
        .collect();
    fixture.api.seed_history(fixture.task.clone(), history);

    let (service, mut ui) = fixture.open().await;
    let outcome = service.load_more();
    assert_eq!(outcome.new_window, 100);
    assert_eq!(
        ui.try_recv().ok(),
        Some(UiEvent::WindowResized {
            anchor_from_bottom: 50
        })
    );
}

#[tokio::test]
async fn inbound_message_for_open_task_is_appended_and_marked_read() {
    let fixture = Fixture::new().await;
    let (service, _ui) = fixture.open().await;

    let envelope = crate::channel::CommentEnvelope::from_comment(&fixture.stored("c-live", "hey"));
    service
        .handle_event(ServerEvent::MessageReceived(envelope))
        .await;

    assert_eq!(service.history_len(), 1);
    let markers = fixture.api.recorded_read_markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers.first().map(|(t, _)| t.clone()), Some(fixture.task.clone()));
}

#[tokio::test]
async fn inbound_message_for_other_task_becomes_toast() {
    let fixture = Fixture::new().await;
    let (service, mut ui) = fixture.open().await;

    service.handle_event(foreign_envelope("t-99")).await;

    assert_eq!(service.history_len(), 0);
    assert_eq!(
        ui.try_recv().ok(),
        Some(UiEvent::Toast {
            text: "New message from Cleo".to_owned()
        })
    );
}

#[tokio::test]
async fn duplicate_delivery_nets_one_insertion() {
    let fixture = Fixture::new().await;
    let (service, _ui) = fixture.open().await;

    let envelope = crate::channel::CommentEnvelope::from_comment(&fixture.stored("c-dup", "hey"));
    service
        .handle_event(ServerEvent::MessageReceived(envelope.clone()))
        .await;
    service
        .handle_event(ServerEvent::MessageReceived(envelope))
        .await;

    assert_eq!(service.history_len(), 1);
}

#[tokio::test]
async fn send_text_inserts_optimistically_and_broadcasts() {
    let fixture = Fixture::new().await;
    let peer = fixture.hub.register();
    let mut peer_rx = peer.subscribe();
    let (service, _ui) = fixture.open().await;

    service.send_text("shipping today").await.expect("send");

    assert_eq!(service.history_len(), 1);
    let sent = service.window();
    assert_eq!(
        sent.first().map(|c| c.author().display_name().to_owned()),
        Some("Alice".to_owned())
    );
    // The room peer received the broadcast without any reload.
    let received = peer_rx.try_recv().expect("peer delivery");
    assert!(matches!(received, ServerEvent::MessageReceived(env) if env.body == "shipping today"));
    // Read marker persisted after send.
    assert_eq!(fixture.api.recorded_read_markers().len(), 1);
}

#[tokio::test]
async fn send_file_round_trips_the_descriptor_to_the_room() {
    let fixture = Fixture::new().await;
    let peer = fixture.hub.register();
    let mut peer_rx = peer.subscribe();
    let (service, _ui) = fixture.open().await;

    let descriptor = FileDescriptor {
        file_name: "offer-letter.pdf".to_owned(),
        url: "https://files.portal.test/offer-letter.pdf".to_owned(),
        mime_type: Some("application/pdf".to_owned()),
        size_bytes: Some(102_400),
    };
    service.send_file(&descriptor).await.expect("send");

    assert_eq!(service.history_len(), 1);
    let window = service.window();
    let sent = window.first().expect("file comment inserted");
    assert!(sent.is_file());
    assert_eq!(
        sent.display_content(),
        DisplayContent::File(descriptor.clone())
    );

    // The room peer can reconstruct the descriptor from the broadcast body.
    let received = peer_rx.try_recv().expect("peer delivery");
    let ServerEvent::MessageReceived(envelope) = received else {
        panic!("expected a message delivery");
    };
    assert!(envelope.is_file);
    let delivered: FileDescriptor =
        serde_json::from_str(&envelope.body).expect("descriptor parses");
    assert_eq!(delivered, descriptor);
}

#[tokio::test]
async fn own_echo_is_dropped_by_nonce_when_ack_had_no_id() {
    let fixture = Fixture::new().await;
    fixture.api.acknowledge_without_id(true);
    fixture.hub.set_echo_to_sender(true);
    let (service, _ui) = fixture.open().await;
    let mut own_rx = fixture.channel.subscribe();
    own_rx.try_recv().ok(); // drain the connect ack if buffered

    service.send_text("optimistic").await.expect("send");
    assert_eq!(service.history_len(), 1);

    // The backend echo arrives with the server id but the same nonce.
    let mut echoed = None;
    while let Ok(event) = own_rx.try_recv() {
        if matches!(event, ServerEvent::MessageReceived(_)) {
            echoed = Some(event);
        }
    }
    // Simulate the backend persisting under its own id: the echo keeps
    // the nonce but carries a different identifier than the placeholder.
    let echo = match echoed.expect("echo delivered to sender") {
        ServerEvent::MessageReceived(mut env) => {
            env.id = CommentId::new("srv-reassigned");
            ServerEvent::MessageReceived(env)
        }
        other => other,
    };
    service.handle_event(echo).await;

    assert_eq!(service.history_len(), 1, "echo must not duplicate the send");
}

#[tokio::test]
async fn send_failure_propagates_without_insert() {
    let fixture = Fixture::new().await;
    let (service, _ui) = fixture.open().await;
    service.close();

    let err = service.send_text("too late").await.expect_err("disposed");
    assert!(matches!(err, CommentSyncError::Disposed));
    assert_eq!(service.history_len(), 0);
}

#[tokio::test]
async fn closed_view_ignores_inbound_events() {
    let fixture = Fixture::new().await;
    let (service, mut ui) = fixture.open().await;
    service.close();

    let envelope = crate::channel::CommentEnvelope::from_comment(&fixture.stored("c-x", "hey"));
    service
        .handle_event(ServerEvent::MessageReceived(envelope))
        .await;
    service.handle_event(foreign_envelope("t-9")).await;

    assert_eq!(service.history_len(), 0);
    assert!(ui.try_recv().is_err());
}

#[tokio::test]
async fn read_marker_failure_is_swallowed() {
    let fixture = Fixture::new().await;
    fixture.api.fail_mark_read(true);
    let (service, _ui) = fixture.open().await;

    let envelope = crate::channel::CommentEnvelope::from_comment(&fixture.stored("c-1", "hey"));
    service
        .handle_event(ServerEvent::MessageReceived(envelope))
        .await;
    assert_eq!(service.history_len(), 1, "insert survives marker failure");

    service.send_text("still fine").await.expect("send succeeds");
}

#[tokio::test]
async fn typing_indicator_expires_after_quiet_window() {
    let fixture = Fixture::new().await;
    let api = Arc::clone(&fixture.api);
    let transport = fixture.hub.register();
    let channel = Arc::new(ChannelClient::new(Arc::new(transport.clone())));
    channel.connect().await.expect("connect");

    // A zero quiet window expires on the next tick, which keeps the test
    // deterministic under the real clock.
    let config = PortalConfig::new("https://api.portal.test", "wss://rt.portal.test")
        .with_typing_quiet_window(Duration::zero());
    let (service, _ui) = CommentSyncService::open(
        api,
        channel,
        Arc::new(DefaultClock),
        fixture.session.clone(),
        fixture.task.clone(),
        &config,
    )
    .await
    .expect("view opens");

    service.keystroke().await.expect("typing emit");
    assert!(service.is_typing());
    service.tick().await.expect("tick");
    assert!(!service.is_typing());
    service.tick().await.expect("tick after idle");

    let stops = transport
        .sent_events()
        .into_iter()
        .filter(|e| matches!(e, ClientEvent::StopTyping(_)))
        .count();
    assert_eq!(stops, 1, "stop typing emitted exactly once");
    let typings = transport
        .sent_events()
        .into_iter()
        .filter(|e| matches!(e, ClientEvent::Typing(_)))
        .count();
    assert_eq!(typings, 1);
}
