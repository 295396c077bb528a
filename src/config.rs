//! Static client configuration.

use chrono::Duration;

/// Default number of comments shown when a thread opens, and the increment
/// added by each "load more".
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Default quiet window after the last keystroke before the typing
/// indicator is withdrawn.
pub const DEFAULT_TYPING_QUIET_SECONDS: i64 = 3;

/// Statically configured endpoints and tuning for one portal deployment.
///
/// Built once at startup and shared by reference; there is no runtime
/// reconfiguration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    api_base_url: String,
    channel_endpoint: String,
    page_size: usize,
    typing_quiet_window: Duration,
}

impl PortalConfig {
    /// Creates a configuration for the given REST base URL and real-time
    /// channel endpoint.
    #[must_use]
    pub fn new(api_base_url: impl Into<String>, channel_endpoint: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            channel_endpoint: channel_endpoint.into(),
            page_size: DEFAULT_PAGE_SIZE,
            typing_quiet_window: Duration::seconds(DEFAULT_TYPING_QUIET_SECONDS),
        }
    }

    /// Overrides the comment page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Overrides the typing-indicator quiet window.
    #[must_use]
    pub const fn with_typing_quiet_window(mut self, window: Duration) -> Self {
        self.typing_quiet_window = window;
        self
    }

    /// Returns the REST base URL.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Returns the real-time channel endpoint.
    #[must_use]
    pub fn channel_endpoint(&self) -> &str {
        &self.channel_endpoint
    }

    /// Returns the comment page size.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the typing quiet window.
    #[must_use]
    pub const fn typing_quiet_window(&self) -> Duration {
        self.typing_quiet_window
    }
}
