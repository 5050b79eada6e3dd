//! ApiClient status handling and bearer token behaviour, over the mock
//! HTTP layer.

mod common;

use common::*;
use serde_json::json;
use spherag::adapters::{MockHttpClient, MockResponse};
use spherag::api::ApiOutcome;
use spherag::auth::{Credentials, Session};
use spherag::error::ErrorCategory;
use spherag::models::PageFetch;
use spherag::traits::{HttpError, Method};

#[tokio::test]
async fn test_token_is_read_at_call_time() {
    let http = MockHttpClient::new();
    http.set_default_response(MockResponse::json(200, json!({"records": []})));
    let session = Session::new();
    let api = mock_api(&http, session.clone());

    session.set(Credentials::new("ana", "first"));
    api.list_systems(1).await.unwrap();
    session.set(Credentials::new("ana", "second"));
    api.list_systems(1).await.unwrap();

    let requests = http.get_requests();
    assert_eq!(requests[0].header("Authorization"), Some("Bearer first"));
    assert_eq!(requests[1].header("Authorization"), Some("Bearer second"));
}

#[tokio::test]
async fn test_cleared_session_still_sends_empty_bearer() {
    let http = MockHttpClient::new();
    http.set_default_response(MockResponse::json(200, json!({"records": []})));
    let session = signed_in_session("tok");
    let api = mock_api(&http, session.clone());

    session.clear();
    api.list_systems(1).await.unwrap();

    assert_eq!(
        http.get_requests()[0].header("Authorization"),
        Some("Bearer ")
    );
}

#[tokio::test]
async fn test_login_posts_credentials_without_bearer() {
    let http = MockHttpClient::new();
    http.set_response(AUTH_URL, MockResponse::json(200, json!({"token": "abc"})));
    let session = Session::new();
    let api = mock_api(&http, session.clone());

    let response = api.login(" ana ", "secret").await.unwrap();

    assert_eq!(response.token, "abc");
    assert_eq!(session.current(), Some(Credentials::new("ana", "abc")));
    let request = &http.get_requests()[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.header("Authorization"), None);
    let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"username": "ana", "password": "secret"}));
}

#[tokio::test]
async fn test_login_rejected() {
    let http = MockHttpClient::new();
    http.set_response(AUTH_URL, MockResponse::status(401, "bad credentials"));
    let session = Session::new();
    let api = mock_api(&http, session.clone());

    let err = api.login("ana", "wrong").await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::User);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_unauthorized_clears_session() {
    let http = MockHttpClient::new();
    http.set_default_response(MockResponse::status(401, "expired"));
    let session = signed_in_session("old");
    let api = mock_api(&http, session.clone());

    let err = api.list_systems(1).await.unwrap_err();

    assert_eq!(err.http_status(), Some(401));
    assert!(err.requires_reauth());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_forbidden_keeps_session() {
    let http = MockHttpClient::new();
    http.set_default_response(MockResponse::status(403, "not yours"));
    let session = signed_in_session("tok");
    let api = mock_api(&http, session.clone());

    let err = api.list_atlases(5, 1).await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::User);
    assert!(!err.requires_reauth());
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_no_content_is_no_data() {
    let http = MockHttpClient::new();
    http.set_default_response(MockResponse::status(204, ""));
    let api = mock_api(&http, signed_in_session("tok"));

    assert_eq!(
        api.list_systems(3).await.unwrap(),
        PageFetch::NoData { status: 204 }
    );
    assert_eq!(api.get_atlas("861").await.unwrap(), None);
    assert_eq!(
        api.request("/Anything", Method::Get, None).await.unwrap(),
        ApiOutcome::NoData { status: 204 }
    );
}

#[tokio::test]
async fn test_get_atlas_parses_connectors() {
    let http = MockHttpClient::new();
    http.set_response(
        &format!("{}/Atlas/861", API_BASE),
        MockResponse::json(200, atlas_json("861")),
    );
    let api = mock_api(&http, signed_in_session("tok"));

    let atlas = api.get_atlas("861").await.unwrap().unwrap();

    assert_eq!(atlas.imei, "861");
    assert_eq!(atlas.connectors.output.len(), 1);
    assert_eq!(atlas.map_center().unwrap().latitude, 37.5);
}

#[tokio::test]
async fn test_malformed_body_is_server_error() {
    let http = MockHttpClient::new();
    http.set_default_response(MockResponse::status(200, "{not json"));
    let api = mock_api(&http, signed_in_session("tok"));

    let err = api.list_systems(1).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Server);
}

#[tokio::test]
async fn test_transport_failure_is_network_error() {
    let http = MockHttpClient::new();
    http.set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
        "refused".to_string(),
    )));
    let api = mock_api(&http, signed_in_session("tok"));

    let err = api.list_systems(1).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Network);
    assert_eq!(http.request_count(), 1);
}
