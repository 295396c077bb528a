//! Error types for the HTTP layer.

use std::sync::Arc;
use thiserror::Error;

/// Errors produced by [`crate::http::ApiClient`] and its transport.
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    /// The underlying transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(#[source] Arc<dyn std::error::Error + Send + Sync>),

    /// The backend answered with a non-success status.
    #[error("request failed with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, useful for surfacing backend messages.
        body: String,
    },

    /// A response body could not be decoded into the expected shape.
    #[error("response decode error: {0}")]
    Decode(String),

    /// The silent token refresh round trip did not yield a new token.
    #[error("token refresh failed: {0}")]
    RefreshFailed(String),
}

impl HttpError {
    /// Wraps a transport-level error.
    #[must_use]
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Creates a decode error from any displayable cause.
    #[must_use]
    pub fn decode(cause: impl ToString) -> Self {
        Self::Decode(cause.to_string())
    }
}
