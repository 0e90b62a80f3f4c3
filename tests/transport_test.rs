// ABOUTME: Integration tests for the sanitizing transport against a mock HTTP server
// ABOUTME: Covers credential attachment, payload repair, retry bounds, and error classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use serde_json::{json, Value};
use url::Url;
use vitaltrack::config::ClientConfig;
use vitaltrack::errors::ErrorCode;
use vitaltrack::session::{Role, Session};
use vitaltrack::transport::{Method, MultipartPayload, RequestBody, RetryPolicy};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{expired_token, mock_config, recording_transport, valid_token};

#[tokio::test]
async fn test_bearer_token_and_query_are_sent() -> Result<()> {
    let server = MockServer::start().await;
    let token = valid_token();

    Mock::given(method("GET"))
        .and(path("/api/user/health-records"))
        .and(query_param("dateRange", "week"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "records": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let session = Arc::new(Session::new());
    session.sign_in(token, Role::User);
    let (transport, _) = recording_transport(mock_config(&server), session);

    let body = transport
        .request(
            "/user/health-records",
            Method::GET,
            Some(RequestBody::Json(json!({ "dateRange": "week" }))),
        )
        .await?;

    assert_eq!(body, Some(json!({ "records": [] })));
    Ok(())
}

#[tokio::test]
async fn test_expired_token_is_not_attached() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/health-guide"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tips": [] })))
        .mount(&server)
        .await;

    let session = Arc::new(Session::new());
    session.sign_in(expired_token(), Role::User);
    let (transport, _) = recording_transport(mock_config(&server), session.clone());

    transport
        .request("/user/health-guide", Method::GET, None)
        .await?;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
    assert!(!session.is_authenticated());
    Ok(())
}

#[tokio::test]
async fn test_non_finite_tokens_are_repaired() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/health-records"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"records":[{"id":1,"glucose":NaN,"weight":-Infinity,"note":"NaN stays"}]}"#,
        ))
        .mount(&server)
        .await;

    let (transport, sleeper) = recording_transport(mock_config(&server), Arc::new(Session::new()));
    let body = transport
        .request("/user/health-records", Method::GET, None)
        .await?
        .unwrap();

    let record = &body["records"][0];
    assert_eq!(record["glucose"], Value::Null);
    assert_eq!(record["weight"], Value::Null);
    assert_eq!(record["note"], "NaN stays");
    assert!(sleeper.delays().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_malformed_read_is_retried_then_surfaced() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/health-records"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(3)
        .mount(&server)
        .await;

    let (transport, sleeper) = recording_transport(mock_config(&server), Arc::new(Session::new()));
    let error = transport
        .request("/user/health-records", Method::GET, None)
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::MalformedResponse);
    assert_eq!(
        error.context.details["snippet"].as_str(),
        Some("<html>maintenance</html>")
    );
    assert!(error.context.request_id.is_some());
    assert_eq!(
        sleeper.delays(),
        vec![Duration::from_millis(1000), Duration::from_millis(2000)]
    );
    Ok(())
}

#[tokio::test]
async fn test_malformed_write_is_not_retried() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/health-records/add"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{broken"))
        .expect(1)
        .mount(&server)
        .await;

    let (transport, sleeper) = recording_transport(mock_config(&server), Arc::new(Session::new()));
    let error = transport
        .request(
            "/user/health-records/add",
            Method::POST,
            Some(RequestBody::Json(json!({ "glucose": 5.5 }))),
        )
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::MalformedResponse);
    assert!(sleeper.delays().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_error_status_surfaces_server_message_without_retry() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/health-records"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "database offline" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (transport, sleeper) = recording_transport(mock_config(&server), Arc::new(Session::new()));
    let error = transport
        .request("/user/health-records", Method::GET, None)
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::TransportError);
    assert_eq!(error.status(), Some(500));
    assert_eq!(error.message, "database offline");
    assert!(!error.is_retryable());
    assert!(sleeper.delays().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_empty_success_body_is_none() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/user/health-records/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (transport, _) = recording_transport(mock_config(&server), Arc::new(Session::new()));
    let body = transport
        .request("/user/health-records/7", Method::DELETE, None)
        .await?;

    assert!(body.is_none());
    Ok(())
}

fn unreachable_config() -> ClientConfig {
    // Bind then drop to obtain a port nothing listens on
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    ClientConfig::with_api_base(Url::parse(&format!("http://127.0.0.1:{port}/api")).unwrap())
}

#[tokio::test]
async fn test_failing_write_is_attempted_at_most_three_times() {
    let (transport, sleeper) = recording_transport(unreachable_config(), Arc::new(Session::new()));

    let error = transport
        .request(
            "/user/feedback",
            Method::POST,
            Some(RequestBody::Json(json!({ "content": "hello" }))),
        )
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::NetworkError);
    assert_eq!(error.message, "cannot reach server");
    assert_eq!(
        sleeper.delays(),
        vec![Duration::from_secs(1), Duration::from_secs(2)]
    );
}

#[tokio::test]
async fn test_unreachable_read_is_retried_with_linear_backoff() {
    let (transport, sleeper) = recording_transport(unreachable_config(), Arc::new(Session::new()));

    let error = transport
        .request(
            "/user/health-records",
            Method::GET,
            Some(RequestBody::Json(json!({ "dateRange": "month" }))),
        )
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::NetworkError);
    assert!(error.is_retryable());
    assert_eq!(
        sleeper.delays(),
        vec![Duration::from_secs(1), Duration::from_secs(2)]
    );
}

#[tokio::test]
async fn test_write_network_retry_can_be_disabled() {
    let (transport, sleeper) = recording_transport(unreachable_config(), Arc::new(Session::new()));
    let transport = transport.with_retry_policy(RetryPolicy {
        retry_writes_on_network_error: false,
        ..RetryPolicy::default()
    });

    let error = transport
        .request("/user/health-records/1", Method::DELETE, None)
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::NetworkError);
    assert!(sleeper.delays().is_empty());
}

#[tokio::test]
async fn test_multipart_upload_sends_file_part() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/upload"))
        .and(body_string_contains("filename=\"readings.csv\""))
        .and(body_string_contains("date,glucose"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "imported": 2 })))
        .expect(1)
        .mount(&server)
        .await;

    let (transport, _) = recording_transport(mock_config(&server), Arc::new(Session::new()));
    let form = MultipartPayload::new().file(
        "file",
        "readings.csv",
        b"date,glucose\n2023-11-15,5.6\n2023-11-16,5.9\n".to_vec(),
        Some("text/csv".to_owned()),
    );

    let body = transport
        .request("/admin/upload", Method::POST, Some(RequestBody::Multipart(form)))
        .await?;

    assert_eq!(body, Some(json!({ "imported": 2 })));
    Ok(())
}

#[tokio::test]
async fn test_multipart_body_on_read_is_rejected() {
    let server = MockServer::start().await;
    let (transport, _) = recording_transport(mock_config(&server), Arc::new(Session::new()));

    let error = transport
        .request(
            "/admin/upload",
            Method::GET,
            Some(RequestBody::Multipart(MultipartPayload::new())),
        )
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ValidationError);
    assert!(server.received_requests().await.unwrap().is_empty());
}
