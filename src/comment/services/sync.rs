//! Live synchronization of one open task's comment thread.

use crate::auth::Session;
use crate::channel::{ChannelClient, ChannelError, CommentEnvelope, ServerEvent};
use crate::comment::domain::{
    Author, ClientNonce, Comment, CommentId, CommentThread, FileDescriptor, LoadMoreOutcome,
    TaskId,
};
use crate::comment::ports::{CommentApi, CommentDraft};
use crate::config::PortalConfig;
use crate::http::HttpError;
use mockable::Clock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Presentation-level effects the embedding UI renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Transient toast, e.g. a message arriving for a task that is not the
    /// one currently open.
    Toast {
        /// Toast text.
        text: String,
    },
    /// Another viewer of this task started or stopped typing.
    PeerTyping {
        /// Whether the indicator should be shown.
        active: bool,
    },
    /// The displayed window grew; the embedder re-applies the recorded
    /// distance from the bottom so the viewport does not jump.
    WindowResized {
        /// Number of items that were visible before the resize.
        anchor_from_bottom: usize,
    },
}

/// Errors surfaced by the comment view.
#[derive(Debug, Error)]
pub enum CommentSyncError {
    /// A REST call failed.
    #[error(transparent)]
    Api(#[from] HttpError),
    /// A channel emit failed.
    #[error(transparent)]
    Channel(#[from] ChannelError),
    /// A file descriptor could not be serialised for sending.
    #[error("file descriptor encode error: {0}")]
    Encode(String),
    /// The view was closed; late results are discarded, not applied.
    #[error("comment view is closed")]
    Disposed,
}

/// Synchronization engine for one open task view.
///
/// Created when the task detail screen mounts: fetches the full history,
/// joins the task's room, and then merges inbound channel events into the
/// thread for as long as the view stays open. `close()` sets a disposal
/// flag that late-arriving async results check before touching state, so
/// an unmounted view cannot be mutated by a stale response.
pub struct CommentSyncService<A, C>
where
    A: CommentApi,
    C: Clock + Send + Sync,
{
    api: Arc<A>,
    channel: Arc<ChannelClient>,
    clock: Arc<C>,
    session: Session,
    task_id: TaskId,
    thread: RwLock<CommentThread>,
    typing: RwLock<super::TypingTracker>,
    disposed: AtomicBool,
    ui: mpsc::UnboundedSender<UiEvent>,
}

impl<A, C> CommentSyncService<A, C>
where
    A: CommentApi,
    C: Clock + Send + Sync,
{
    /// Opens the task view: fetches history, joins the room, and displays
    /// the most recent page.
    ///
    /// Returns the service plus the stream of [`UiEvent`]s the embedder
    /// renders.
    ///
    /// # Errors
    ///
    /// Returns [`CommentSyncError`] when the history fetch or the room
    /// join fails; the view does not open partially.
    pub async fn open(
        api: Arc<A>,
        channel: Arc<ChannelClient>,
        clock: Arc<C>,
        session: Session,
        task_id: TaskId,
        config: &PortalConfig,
    ) -> Result<(Self, mpsc::UnboundedReceiver<UiEvent>), CommentSyncError> {
        let history = api.fetch_history(&task_id).await?;
        channel.join_chat(&task_id).await?;

        let mut thread = CommentThread::new(config.page_size());
        thread.load_history(history);
        debug!(task_id = %task_id, total = thread.len(), window = thread.window_len(), "task view opened");

        let (ui, ui_events) = mpsc::unbounded_channel();
        let service = Self {
            api,
            channel,
            clock,
            session,
            task_id,
            thread: RwLock::new(thread),
            typing: RwLock::new(super::TypingTracker::new(config.typing_quiet_window())),
            disposed: AtomicBool::new(false),
            ui,
        };
        Ok((service, ui_events))
    }

    /// Applies one inbound channel event.
    ///
    /// The embedder pumps its channel subscription through here; events
    /// for other tasks surface as a toast instead of touching the thread.
    pub async fn handle_event(&self, event: ServerEvent) {
        if self.is_disposed() {
            return;
        }
        match event {
            ServerEvent::MessageReceived(envelope) => self.on_message_received(envelope).await,
            ServerEvent::TypingStarted(task_id) if task_id == self.task_id => {
                self.emit(UiEvent::PeerTyping { active: true });
            }
            ServerEvent::TypingStopped(task_id) if task_id == self.task_id => {
                self.emit(UiEvent::PeerTyping { active: false });
            }
            ServerEvent::Connected
            | ServerEvent::Notification(_)
            | ServerEvent::TypingStarted(_)
            | ServerEvent::TypingStopped(_) => {}
        }
    }

    /// Sends a free-text comment.
    ///
    /// The comment is inserted optimistically with the acknowledged server
    /// id when present, else a random placeholder, then broadcast to the
    /// room.
    ///
    /// # Errors
    ///
    /// Returns [`CommentSyncError`] when the post or broadcast fails, or
    /// when the view was closed while the post was in flight.
    pub async fn send_text(&self, body: &str) -> Result<(), CommentSyncError> {
        self.send_draft(body.to_owned(), false).await
    }

    /// Sends one file comment; multi-file selections post one comment per
    /// file.
    ///
    /// # Errors
    ///
    /// Returns [`CommentSyncError::Encode`] when the descriptor cannot be
    /// serialised, otherwise as [`Self::send_text`].
    pub async fn send_file(&self, descriptor: &FileDescriptor) -> Result<(), CommentSyncError> {
        let body = serde_json::to_string(descriptor)
            .map_err(|e| CommentSyncError::Encode(e.to_string()))?;
        self.send_draft(body, true).await
    }

    /// Grows the displayed window by one page and records the scroll
    /// anchor for the embedder.
    #[must_use]
    pub fn load_more(&self) -> LoadMoreOutcome {
        let outcome = self
            .thread
            .write()
            .map(|mut guard| guard.load_more())
            .unwrap_or(LoadMoreOutcome {
                previous_window: 0,
                new_window: 0,
            });
        if outcome.grew() {
            self.emit(UiEvent::WindowResized {
                anchor_from_bottom: outcome.previous_window,
            });
        }
        outcome
    }

    /// Records a composer keystroke and signals the room.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError`] when the emit fails.
    pub async fn keystroke(&self) -> Result<(), ChannelError> {
        if let Ok(mut guard) = self.typing.write() {
            guard.keystroke(self.clock.utc());
        }
        self.channel.typing(&self.task_id).await
    }

    /// Withdraws the typing indicator if the quiet window elapsed.
    ///
    /// The embedder calls this periodically (or at the tracked deadline);
    /// the `stop typing` emit happens at most once per quiet period.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError`] when the emit fails.
    pub async fn tick(&self) -> Result<(), ChannelError> {
        let expired = self
            .typing
            .write()
            .map(|mut guard| guard.try_expire(self.clock.utc()))
            .unwrap_or(false);
        if expired {
            self.channel.stop_typing(&self.task_id).await?;
        }
        Ok(())
    }

    /// Returns whether the local user currently counts as typing.
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.typing
            .read()
            .map(|guard| guard.is_typing())
            .unwrap_or(false)
    }

    /// Returns the displayed window, oldest first.
    #[must_use]
    pub fn window(&self) -> Vec<Comment> {
        self.thread
            .read()
            .map(|guard| guard.window().to_vec())
            .unwrap_or_default()
    }

    /// Returns the full known history length.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.thread.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns the displayed window size.
    #[must_use]
    pub fn window_len(&self) -> usize {
        self.thread
            .read()
            .map(|guard| guard.window_len())
            .unwrap_or(0)
    }

    /// Returns whether older comments exist beyond the window.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.thread
            .read()
            .map(|guard| guard.has_more())
            .unwrap_or(false)
    }

    /// Closes the view. Idempotent; subsequent events and late responses
    /// are discarded.
    pub fn close(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    /// Returns whether the view has been closed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    async fn on_message_received(&self, envelope: CommentEnvelope) {
        if envelope.task_id != self.task_id {
            self.emit(UiEvent::Toast {
                text: format!("New message from {}", envelope.author_name),
            });
            return;
        }

        let outcome = match self.thread.write() {
            Ok(mut guard) => guard.insert(envelope.into_comment()),
            Err(_) => return,
        };
        if outcome.was_inserted() {
            self.persist_read_marker().await;
        } else {
            debug!(task_id = %self.task_id, ?outcome, "dropped duplicate delivery");
        }
    }

    async fn send_draft(&self, body: String, is_file: bool) -> Result<(), CommentSyncError> {
        if self.is_disposed() {
            return Err(CommentSyncError::Disposed);
        }
        let nonce = ClientNonce::new();
        let draft = CommentDraft {
            body: body.clone(),
            is_file,
            nonce,
        };
        let ack = self
            .api
            .post_comment(&self.task_id, self.session.user_id(), &draft)
            .await?;
        if self.is_disposed() {
            return Err(CommentSyncError::Disposed);
        }

        // The acknowledged id wins; otherwise the insert rides on a local
        // placeholder and the nonce carries the reconciliation.
        let id = ack.id.unwrap_or_else(CommentId::placeholder);
        let author = Author::new(
            self.session.user_id().clone(),
            self.session.display_name(),
        );
        let comment = Comment::from_wire(
            id,
            self.task_id.clone(),
            author,
            body,
            is_file,
            Some(nonce),
            self.clock.utc(),
        );
        if let Ok(mut guard) = self.thread.write() {
            guard.insert(comment.clone());
        }

        self.channel
            .new_message(CommentEnvelope::from_comment(&comment))
            .await?;
        self.persist_read_marker().await;
        Ok(())
    }

    /// Fire-and-forget read-marker persistence: failures are logged and
    /// never surfaced, and no local copy of the marker is kept.
    async fn persist_read_marker(&self) {
        if let Err(error) = self
            .api
            .mark_read(&self.task_id, self.session.user_id())
            .await
        {
            warn!(task_id = %self.task_id, %error, "failed to persist read marker");
        }
    }

    fn emit(&self, event: UiEvent) {
        self.ui.send(event).ok();
    }
}
