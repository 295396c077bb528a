//! Transport port separating request shaping from request execution.
//!
//! The [`crate::http::ApiClient`] owns authentication and retry policy; the
//! transport only moves one already-shaped request to the backend and
//! returns the raw status and body. This keeps the refresh-and-retry logic
//! testable against a scripted in-memory transport.

use crate::http::error::HttpError;
use async_trait::async_trait;
use serde_json::Value;

/// HTTP method subset used by the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Resource read.
    Get,
    /// Resource creation / RPC-style calls.
    Post,
    /// Partial resource update.
    Patch,
    /// Resource removal.
    Delete,
}

impl Method {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// One fully-shaped request ready for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    method: Method,
    url: String,
    bearer_token: Option<String>,
    json_body: Option<Value>,
    with_credentials: bool,
}

impl ApiRequest {
    /// Creates a request for the given method and absolute URL.
    #[must_use]
    pub const fn new(method: Method, url: String) -> Self {
        Self {
            method,
            url,
            bearer_token: None,
            json_body: None,
            with_credentials: false,
        }
    }

    /// Attaches a bearer token, rendered as `Authorization: Bearer <token>`.
    #[must_use]
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Attaches a JSON body.
    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.json_body = Some(body);
        self
    }

    /// Marks the request as credentialed (cookies included), used by the
    /// refresh-token round trip.
    #[must_use]
    pub const fn with_credentials(mut self) -> Self {
        self.with_credentials = true;
        self
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Returns the absolute URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the bearer token, if set.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    /// Returns the JSON body, if set.
    #[must_use]
    pub const fn json_body(&self) -> Option<&Value> {
        self.json_body.as_ref()
    }

    /// Returns whether the request carries credentials.
    #[must_use]
    pub const fn is_credentialed(&self) -> bool {
        self.with_credentials
    }
}

/// Raw response handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    status: u16,
    body: String,
}

impl ApiResponse {
    /// Creates a response from a status code and body text.
    #[must_use]
    pub const fn new(status: u16, body: String) -> Self {
        Self { status, body }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns the raw body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the `message` field of a JSON error body, if present.
    ///
    /// The backend signals an expired JWT with a `401` whose body message
    /// equals exactly `"JWT Expired"`; this accessor is how the client
    /// inspects that without committing to a full error schema.
    #[must_use]
    pub fn json_message(&self) -> Option<String> {
        let value: Value = serde_json::from_str(&self.body).ok()?;
        value
            .get("message")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned)
    }
}

/// Port executing one shaped request against the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Executes the request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Transport`] when the request could not be
    /// delivered at all (connection refused, DNS failure). Non-success
    /// statuses are returned as ordinary responses, not errors.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::{ApiRequest, ApiResponse, Method};
    use serde_json::json;

    #[test]
    fn request_builder_sets_all_parts() {
        let request = ApiRequest::new(Method::Post, "https://api.example/tasks".to_owned())
            .with_bearer("jwt")
            .with_json(json!({"title": "t"}))
            .with_credentials();

        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.url(), "https://api.example/tasks");
        assert_eq!(request.bearer_token(), Some("jwt"));
        assert_eq!(request.json_body(), Some(&json!({"title": "t"})));
        assert!(request.is_credentialed());
    }

    #[test]
    fn response_extracts_json_message() {
        let response = ApiResponse::new(401, r#"{"message":"JWT Expired"}"#.to_owned());
        assert_eq!(response.json_message(), Some("JWT Expired".to_owned()));
        assert!(!response.is_success());
    }

    #[test]
    fn response_message_absent_for_plain_body() {
        let response = ApiResponse::new(500, "internal error".to_owned());
        assert_eq!(response.json_message(), None);
    }
}
