//! Production [`HttpTransport`] backed by `reqwest`.

use crate::http::{
    error::HttpError,
    transport::{ApiRequest, ApiResponse, HttpTransport, Method},
};
use async_trait::async_trait;

/// `reqwest`-backed transport.
///
/// Holds one connection-pooling client for the process. The cookie store is
/// enabled so the credentialed refresh round trip can present the refresh
/// cookie set at login. No request timeout is configured beyond the
/// transport defaults.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a cookie-enabled client.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Transport`] if the underlying client cannot be
    /// constructed (TLS backend initialisation failure).
    pub fn new() -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(HttpError::transport)?;
        Ok(Self { client })
    }

    /// Wraps an existing `reqwest` client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn method_of(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, HttpError> {
        let mut builder = self
            .client
            .request(Self::method_of(request.method()), request.url());
        if let Some(token) = request.bearer_token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.json_body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(HttpError::transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(HttpError::transport)?;
        Ok(ApiResponse::new(status, body))
    }
}
