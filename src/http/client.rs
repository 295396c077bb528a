//! The shared REST client with silent token refresh.

use crate::auth::TokenStore;
use crate::config::PortalConfig;
use crate::http::{
    error::HttpError,
    transport::{ApiRequest, ApiResponse, HttpTransport, Method},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Body message the backend uses to signal an expired access token.
const JWT_EXPIRED_MESSAGE: &str = "JWT Expired";

/// Path of the credentialed refresh round trip.
const REFRESH_PATH: &str = "/auth/refreshToken";

/// Process-wide REST client.
///
/// One instance is constructed at startup and shared by every consumer.
/// Each request gets the current bearer token from the [`TokenStore`]; a
/// `401` whose body message equals exactly `"JWT Expired"` triggers one
/// silent refresh round trip followed by one retry of the original
/// request. Every other failure propagates unmodified.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Creates a client for the given REST base URL.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            tokens,
        }
    }

    /// Creates a client targeting the configured REST base URL.
    #[must_use]
    pub fn from_config(
        config: &PortalConfig,
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        Self::new(config.api_base_url(), transport, tokens)
    }

    /// Executes a request against `path` (joined to the base URL),
    /// refreshing the token once if the backend reports it expired.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Transport`] when delivery fails and
    /// [`HttpError::RefreshFailed`] when the refresh round trip does not
    /// yield a new token. Non-success statuses are returned as responses.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, HttpError> {
        let response = self.execute_once(method, path, body.clone()).await?;
        if !Self::is_expired_token(&response) {
            return Ok(response);
        }

        debug!(path, "access token expired; performing silent refresh");
        self.refresh_token().await?;
        self.execute_once(method, path, body).await
    }

    /// Executes a GET and decodes a JSON response body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Status`] for non-success responses and
    /// [`HttpError::Decode`] when the body does not match `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        let response = self.request(Method::Get, path, None).await?;
        Self::decode_success(&response)
    }

    /// Executes a POST with a JSON body and decodes a JSON response body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Status`] for non-success responses and
    /// [`HttpError::Decode`] when the body does not match `T`.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
    ) -> Result<T, HttpError> {
        let response = self.request(Method::Post, path, Some(body)).await?;
        Self::decode_success(&response)
    }

    /// Executes a POST with a JSON body, discarding the response body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Status`] for non-success responses.
    pub async fn post(&self, path: &str, body: Value) -> Result<(), HttpError> {
        let response = self.request(Method::Post, path, Some(body)).await?;
        Self::require_success(&response)
    }

    /// Executes a PATCH with a JSON body, discarding the response body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Status`] for non-success responses.
    pub async fn patch(&self, path: &str, body: Value) -> Result<(), HttpError> {
        let response = self.request(Method::Patch, path, Some(body)).await?;
        Self::require_success(&response)
    }

    async fn execute_once(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, HttpError> {
        let mut request = ApiRequest::new(method, format!("{}{path}", self.base_url));
        if let Some(token) = self.tokens.access_token() {
            request = request.with_bearer(token);
        }
        if let Some(json) = body {
            request = request.with_json(json);
        }
        self.transport.execute(request).await
    }

    /// Performs the credentialed refresh round trip and stores the new
    /// access token.
    async fn refresh_token(&self) -> Result<(), HttpError> {
        let request = ApiRequest::new(Method::Post, format!("{}{REFRESH_PATH}", self.base_url))
            .with_credentials();
        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            return Err(HttpError::RefreshFailed(format!(
                "refresh endpoint answered {}",
                response.status()
            )));
        }

        let value: Value = serde_json::from_str(response.body())
            .map_err(|e| HttpError::RefreshFailed(format!("unreadable refresh body: {e}")))?;
        let token = value
            .get("accessToken")
            .and_then(Value::as_str)
            .ok_or_else(|| HttpError::RefreshFailed("refresh body lacks accessToken".to_owned()))?;

        self.tokens.set_access_token(token.to_owned());
        Ok(())
    }

    fn is_expired_token(response: &ApiResponse) -> bool {
        response.status() == 401
            && response.json_message().as_deref() == Some(JWT_EXPIRED_MESSAGE)
    }

    fn decode_success<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, HttpError> {
        Self::require_success(response)?;
        serde_json::from_str(response.body()).map_err(HttpError::decode)
    }

    fn require_success(response: &ApiResponse) -> Result<(), HttpError> {
        if response.is_success() {
            return Ok(());
        }
        Err(HttpError::Status {
            status: response.status(),
            body: response.body().to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::expect_used,
        reason = "Test code uses expect for assertion clarity"
    )]

    use super::ApiClient;
    use crate::auth::{InMemoryTokenStore, TokenStore};
    use crate::http::{
        error::HttpError,
        transport::{ApiResponse, Method, MockHttpTransport},
    };
    use crate::config::PortalConfig;
    use mockall::Sequence;
    use std::sync::Arc;

    fn client_with(transport: MockHttpTransport, tokens: InMemoryTokenStore) -> ApiClient {
        ApiClient::new("https://api.portal.test", Arc::new(transport), Arc::new(tokens))
    }

    #[tokio::test]
    async fn from_config_targets_the_configured_base_url() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_execute()
            .withf(|req| req.url() == "https://portal.example.edu/api/tasks")
            .times(1)
            .returning(|_| Ok(ApiResponse::new(200, "[]".to_owned())));

        let config = PortalConfig::new("https://portal.example.edu/api", "wss://rt.example.edu");
        let client = ApiClient::from_config(
            &config,
            Arc::new(transport),
            Arc::new(InMemoryTokenStore::new()),
        );
        let response = client
            .request(Method::Get, "/tasks", None)
            .await
            .expect("request succeeds");
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn attaches_bearer_token_to_requests() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_execute()
            .withf(|req| {
                req.bearer_token() == Some("jwt-live") && req.url().ends_with("/tasks")
            })
            .times(1)
            .returning(|_| Ok(ApiResponse::new(200, "[]".to_owned())));

        let client = client_with(transport, InMemoryTokenStore::with_token("jwt-live"));
        let response = client
            .request(Method::Get, "/tasks", None)
            .await
            .expect("request succeeds");
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn refreshes_once_on_expired_jwt_and_retries() {
        let tokens = InMemoryTokenStore::with_token("jwt-stale");
        let mut transport = MockHttpTransport::new();
        let mut seq = Sequence::new();

        transport
            .expect_execute()
            .withf(|req| req.url().ends_with("/tasks") && req.bearer_token() == Some("jwt-stale"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ApiResponse::new(401, r#"{"message":"JWT Expired"}"#.to_owned())));
        transport
            .expect_execute()
            .withf(|req| {
                req.url().ends_with("/auth/refreshToken")
                    && req.method() == Method::Post
                    && req.is_credentialed()
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ApiResponse::new(200, r#"{"accessToken":"jwt-fresh"}"#.to_owned())));
        transport
            .expect_execute()
            .withf(|req| req.url().ends_with("/tasks") && req.bearer_token() == Some("jwt-fresh"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ApiResponse::new(200, "[]".to_owned())));

        let client = client_with(transport, tokens.clone());
        let response = client
            .request(Method::Get, "/tasks", None)
            .await
            .expect("retried request succeeds");
        assert!(response.is_success());
        assert_eq!(tokens.access_token(), Some("jwt-fresh".to_owned()));
    }

    #[tokio::test]
    async fn plain_401_is_not_refreshed() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_execute()
            .times(1)
            .returning(|_| Ok(ApiResponse::new(401, r#"{"message":"Forbidden"}"#.to_owned())));

        let client = client_with(transport, InMemoryTokenStore::with_token("jwt"));
        let response = client
            .request(Method::Get, "/tasks", None)
            .await
            .expect("response returned unmodified");
        assert_eq!(response.status(), 401);
    }

    #[tokio::test]
    async fn second_expiry_after_refresh_propagates() {
        let mut transport = MockHttpTransport::new();
        let mut seq = Sequence::new();
        transport
            .expect_execute()
            .withf(|req| req.url().ends_with("/tasks"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ApiResponse::new(401, r#"{"message":"JWT Expired"}"#.to_owned())));
        transport
            .expect_execute()
            .withf(|req| req.url().ends_with("/auth/refreshToken"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ApiResponse::new(200, r#"{"accessToken":"jwt-2"}"#.to_owned())));
        transport
            .expect_execute()
            .withf(|req| req.url().ends_with("/tasks"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ApiResponse::new(401, r#"{"message":"JWT Expired"}"#.to_owned())));

        let client = client_with(transport, InMemoryTokenStore::with_token("jwt-1"));
        let response = client
            .request(Method::Get, "/tasks", None)
            .await
            .expect("second 401 is returned, not retried again");
        assert_eq!(response.status(), 401);
    }

    #[tokio::test]
    async fn failed_refresh_surfaces_as_refresh_error() {
        let mut transport = MockHttpTransport::new();
        let mut seq = Sequence::new();
        transport
            .expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ApiResponse::new(401, r#"{"message":"JWT Expired"}"#.to_owned())));
        transport
            .expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ApiResponse::new(403, "no refresh cookie".to_owned())));

        let client = client_with(transport, InMemoryTokenStore::with_token("jwt"));
        let err = client
            .request(Method::Get, "/tasks", None)
            .await
            .expect_err("refresh failure propagates");
        assert!(matches!(err, HttpError::RefreshFailed(_)));
    }

    #[tokio::test]
    async fn get_json_maps_error_status() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_execute()
            .times(1)
            .returning(|_| Ok(ApiResponse::new(404, "not found".to_owned())));

        let client = client_with(transport, InMemoryTokenStore::new());
        let err = client
            .get_json::<Vec<String>>("/missing")
            .await
            .expect_err("404 maps to status error");
        assert!(matches!(err, HttpError::Status { status: 404, .. }));
    }
}
