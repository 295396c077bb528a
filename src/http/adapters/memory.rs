//! Scripted in-memory [`HttpTransport`] for behavioural tests.

use crate::http::{
    error::HttpError,
    transport::{ApiRequest, ApiResponse, HttpTransport},
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Transport that replays a queue of canned responses.
///
/// Each executed request pops the next scripted response and is recorded
/// for later inspection. Running past the script yields a transport error,
/// which makes an over-eager client visible in tests.
#[derive(Debug, Default, Clone)]
pub struct ScriptedHttpTransport {
    responses: Arc<Mutex<VecDeque<Result<ApiResponse, HttpError>>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl ScriptedHttpTransport {
    /// Creates a transport with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a successful response to the script.
    pub fn push_response(&self, status: u16, body: impl Into<String>) {
        if let Ok(mut guard) = self.responses.lock() {
            guard.push_back(Ok(ApiResponse::new(status, body.into())));
        }
    }

    /// Appends a transport-level failure to the script.
    pub fn push_failure(&self, error: HttpError) {
        if let Ok(mut guard) = self.responses.lock() {
            guard.push_back(Err(error));
        }
    }

    /// Returns a copy of every request executed so far, in order.
    #[must_use]
    pub fn recorded_requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl HttpTransport for ScriptedHttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, HttpError> {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(request);
        }
        let next = self
            .responses
            .lock()
            .ok()
            .and_then(|mut guard| guard.pop_front());
        next.unwrap_or_else(|| {
            Err(HttpError::Decode(
                "scripted transport exhausted: unexpected request".to_owned(),
            ))
        })
    }
}
