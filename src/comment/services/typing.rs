//! Quiet-window tracking for the typing indicator.

use chrono::{DateTime, Duration, Utc};

/// Tracks the local user's typing state for one composer.
///
/// A keystroke marks the user as typing; the state expires once a full
/// quiet window passes with no further keystrokes. The tracker is purely
/// computational: the service emits the `typing` / `stop typing` channel
/// events around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingTracker {
    quiet_window: Duration,
    last_keystroke: Option<DateTime<Utc>>,
}

impl TypingTracker {
    /// Creates a tracker with the given quiet window.
    #[must_use]
    pub const fn new(quiet_window: Duration) -> Self {
        Self {
            quiet_window,
            last_keystroke: None,
        }
    }

    /// Records a keystroke at `now`.
    pub fn keystroke(&mut self, now: DateTime<Utc>) {
        self.last_keystroke = Some(now);
    }

    /// Returns whether the user currently counts as typing.
    #[must_use]
    pub const fn is_typing(&self) -> bool {
        self.last_keystroke.is_some()
    }

    /// Returns the instant at which the indicator should be withdrawn.
    #[must_use]
    pub fn quiet_deadline(&self) -> Option<DateTime<Utc>> {
        self.last_keystroke.map(|at| at + self.quiet_window)
    }

    /// Expires the typing state if the quiet window elapsed by `now`.
    ///
    /// Returns `true` exactly when the state transitioned from typing to
    /// idle, i.e. when `stop typing` should be emitted.
    pub fn try_expire(&mut self, now: DateTime<Utc>) -> bool {
        match self.quiet_deadline() {
            Some(deadline) if now >= deadline => {
                self.last_keystroke = None;
                true
            }
            _ => false,
        }
    }
}
