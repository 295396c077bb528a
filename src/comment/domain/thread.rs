//! The comment thread: full known history plus the displayed window.

use super::{Comment, CommentId};

/// Outcome of attempting to insert a comment into the thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The comment was appended to the thread.
    Inserted,
    /// A comment with the same identifier is already present.
    DuplicateId(CommentId),
    /// A comment carrying the same client nonce is already present; this is
    /// the channel echo of an optimistic insert whose placeholder id
    /// differs from the server-assigned one.
    DuplicateNonce(CommentId),
}

impl InsertOutcome {
    /// Returns `true` when the comment was actually appended.
    #[must_use]
    pub const fn was_inserted(&self) -> bool {
        matches!(self, Self::Inserted)
    }
}

/// Outcome of a "load more" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadMoreOutcome {
    /// Window size before the resize, which is also the scroll anchor: the
    /// number of items whose distance from the bottom must be preserved
    /// when the embedder re-renders.
    pub previous_window: usize,
    /// Window size after the resize.
    pub new_window: usize,
}

impl LoadMoreOutcome {
    /// Returns `true` when the resize actually revealed older comments.
    #[must_use]
    pub const fn grew(&self) -> bool {
        self.new_window > self.previous_window
    }
}

/// A task's comment history and the suffix currently rendered.
///
/// Two parallel views over one list: the full known history in arrival
/// order, and a displayed window that is always a suffix of it. The window
/// starts at one page and grows by one page per "load more", clamped to
/// the history length. Live arrivals append to both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThread {
    comments: Vec<Comment>,
    window_len: usize,
    page_size: usize,
}

impl CommentThread {
    /// Creates an empty thread with the given page size.
    #[must_use]
    pub const fn new(page_size: usize) -> Self {
        Self {
            comments: Vec::new(),
            window_len: 0,
            page_size,
        }
    }

    /// Replaces the thread content with freshly fetched history and resets
    /// the window to the most recent page.
    pub fn load_history(&mut self, comments: Vec<Comment>) {
        self.window_len = comments.len().min(self.page_size);
        self.comments = comments;
    }

    /// Appends a comment unless its identifier or client nonce is already
    /// present.
    ///
    /// Identifier equality is the primary dedup guard; the nonce check
    /// additionally catches the server echo of an optimistic insert that
    /// was stored under a local placeholder id.
    pub fn insert(&mut self, comment: Comment) -> InsertOutcome {
        if self.comments.iter().any(|c| c.id() == comment.id()) {
            return InsertOutcome::DuplicateId(comment.id().clone());
        }
        if let Some(nonce) = comment.nonce() {
            if self.comments.iter().any(|c| c.nonce() == Some(nonce)) {
                return InsertOutcome::DuplicateNonce(comment.id().clone());
            }
        }

        self.comments.push(comment);
        // The window is a suffix; growing both lists keeps every currently
        // visible comment visible along with the new arrival.
        self.window_len = self.window_len.saturating_add(1).min(self.comments.len());
        InsertOutcome::Inserted
    }

    /// Grows the displayed window by one page, clamped to the history
    /// length.
    pub fn load_more(&mut self) -> LoadMoreOutcome {
        let previous_window = self.window_len;
        self.window_len = self
            .window_len
            .saturating_add(self.page_size)
            .min(self.comments.len());
        LoadMoreOutcome {
            previous_window,
            new_window: self.window_len,
        }
    }

    /// Returns the displayed window: the most recent `window_len` comments.
    #[must_use]
    pub fn window(&self) -> &[Comment] {
        let start = self.comments.len().saturating_sub(self.window_len);
        self.comments.get(start..).unwrap_or_default()
    }

    /// Returns the full known history in arrival order.
    #[must_use]
    pub fn history(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns the full history length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    /// Returns `true` when no comments are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Returns the current window size.
    #[must_use]
    pub const fn window_len(&self) -> usize {
        self.window_len
    }

    /// Returns whether older comments exist beyond the window.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.window_len < self.comments.len()
    }
}
