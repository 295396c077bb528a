//! Behavioural integration tests for the silent token-refresh flow.
//!
//! These drive the shared [`ApiClient`] and a REST adapter over the
//! scripted transport, verifying that an expired-token response is
//! repaired transparently and that the retried call carries the fresh
//! bearer token.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]

use campanile::auth::{InMemoryTokenStore, TokenStore};
use campanile::comment::adapters::rest::RestCommentApi;
use campanile::comment::domain::TaskId;
use campanile::comment::ports::CommentApi;
use campanile::http::adapters::memory::ScriptedHttpTransport;
use campanile::http::{ApiClient, HttpError, Method};
use std::sync::Arc;

const EXPIRED_BODY: &str = r#"{"message":"JWT Expired"}"#;
const REFRESH_BODY: &str = r#"{"accessToken":"jwt-fresh"}"#;

fn history_body() -> String {
    r#"[
        {
            "_id": "c-1",
            "taskId": "t-9",
            "author": { "_id": "u-7", "name": "Priya" },
            "content": "First note",
            "isFile": false,
            "createdAt": "2026-08-20T10:00:00Z"
        },
        {
            "_id": "c-2",
            "taskId": "t-9",
            "author": { "_id": "u-7", "name": "Priya" },
            "content": "Second note",
            "isFile": false,
            "createdAt": "2026-08-20T10:05:00Z"
        }
    ]"#
    .to_owned()
}

fn client_over(transport: &ScriptedHttpTransport, tokens: &InMemoryTokenStore) -> ApiClient {
    ApiClient::new(
        "https://api.portal.test",
        Arc::new(transport.clone()),
        Arc::new(tokens.clone()),
    )
}

#[tokio::test]
async fn expired_token_is_refreshed_mid_fetch() {
    let transport = ScriptedHttpTransport::new();
    transport.push_response(401, EXPIRED_BODY);
    transport.push_response(200, REFRESH_BODY);
    transport.push_response(200, history_body());

    let tokens = InMemoryTokenStore::with_token("jwt-stale");
    let api = RestCommentApi::new(client_over(&transport, &tokens));

    let history = api
        .fetch_history(&TaskId::new("t-9"))
        .await
        .expect("fetch succeeds after the silent refresh");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].author().display_name(), "Priya");

    // One original call, one refresh round trip, one retry.
    let requests = transport.recorded_requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].bearer_token(), Some("jwt-stale"));
    assert!(requests[1].url().ends_with("/auth/refreshToken"));
    assert_eq!(requests[1].method(), Method::Post);
    assert!(requests[1].is_credentialed());
    assert_eq!(requests[2].bearer_token(), Some("jwt-fresh"));
    assert_eq!(tokens.access_token(), Some("jwt-fresh".to_owned()));
}

#[tokio::test]
async fn refresh_happens_at_most_once_per_request() {
    let transport = ScriptedHttpTransport::new();
    transport.push_response(401, EXPIRED_BODY);
    transport.push_response(200, REFRESH_BODY);
    transport.push_response(401, EXPIRED_BODY);

    let tokens = InMemoryTokenStore::with_token("jwt-stale");
    let client = client_over(&transport, &tokens);

    let response = client
        .request(Method::Get, "/tasks/t-9/comments", None)
        .await
        .expect("second expiry is returned, not retried again");
    assert_eq!(response.status(), 401);
    assert_eq!(transport.recorded_requests().len(), 3);
}

#[tokio::test]
async fn failed_refresh_round_trip_propagates() {
    let transport = ScriptedHttpTransport::new();
    transport.push_response(401, EXPIRED_BODY);
    transport.push_response(403, "refresh cookie missing");

    let tokens = InMemoryTokenStore::with_token("jwt-stale");
    let api = RestCommentApi::new(client_over(&transport, &tokens));

    let err = api
        .fetch_history(&TaskId::new("t-9"))
        .await
        .expect_err("refresh failure surfaces to the caller");
    assert!(matches!(err, HttpError::RefreshFailed(_)));
    assert_eq!(tokens.access_token(), Some("jwt-stale".to_owned()));
}

#[tokio::test]
async fn transport_failure_surfaces_without_refresh() {
    let transport = ScriptedHttpTransport::new();
    transport.push_failure(HttpError::transport(std::io::Error::new(
        std::io::ErrorKind::ConnectionReset,
        "socket dropped mid-request",
    )));

    let tokens = InMemoryTokenStore::with_token("jwt-live");
    let api = RestCommentApi::new(client_over(&transport, &tokens));

    let err = api
        .fetch_history(&TaskId::new("t-9"))
        .await
        .expect_err("delivery failure surfaces to the caller");
    assert!(matches!(err, HttpError::Transport(_)));
    // A delivery failure is not an expired token: no refresh rides on it.
    assert_eq!(transport.recorded_requests().len(), 1);
    assert_eq!(tokens.access_token(), Some("jwt-live".to_owned()));
}

#[tokio::test]
async fn non_token_failures_pass_through_unmodified() {
    let transport = ScriptedHttpTransport::new();
    transport.push_response(404, "no such task");

    let tokens = InMemoryTokenStore::with_token("jwt-live");
    let api = RestCommentApi::new(client_over(&transport, &tokens));

    let err = api
        .fetch_history(&TaskId::new("t-missing"))
        .await
        .expect_err("404 maps to a status error");
    assert!(matches!(err, HttpError::Status { status: 404, .. }));
    assert_eq!(transport.recorded_requests().len(), 1);
}
