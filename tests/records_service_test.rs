// ABOUTME: End-to-end tests for the record service over a mock record server
// ABOUTME: Exercises fetch, local reconciliation after writes, derived metrics, and account calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use anyhow::Result;
use serde_json::json;
use vitaltrack::analytics::HealthStatus;
use vitaltrack::api::Feedback;
use vitaltrack::constants::transport::MALFORMED_SNIPPET_CHARS;
use vitaltrack::context::ClientContext;
use vitaltrack::errors::ErrorCode;
use vitaltrack::models::{NewRecord, Period, RecordId, RecordPatch};
use vitaltrack::session::Role;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{init_test_logging, mock_config, valid_token, RecordingSleeper};

fn context_for(server: &MockServer) -> ClientContext {
    init_test_logging();
    let mut config = mock_config(server);
    config.token = Some(valid_token());
    ClientContext::with_sleeper(config, Arc::new(RecordingSleeper::default())).unwrap()
}

async fn mount_month_records(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/user/health-records"))
        .and(query_param("dateRange", "month"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"records":[
                {"id":3,"date":"2023-11-03","glucose":"5.6","weight":70.4,"bloodPressure":"122/80","note":""},
                {"id":2,"date":"2023-11-02","glucose":5.4,"weight":NaN,"bloodPressure":"118/78"},
                {"id":1,"date":"2023-11-01T08:00:00Z","time":"08:00","glucose":5.2,"weight":70.0,"bloodPressure":"n/a"}
            ]}"#,
        ))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_decodes_lenient_payload_and_caches() -> Result<()> {
    let server = MockServer::start().await;
    mount_month_records(&server).await;
    let context = context_for(&server);

    let records = context.records().fetch_records(false).await?;
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].id, RecordId::new("3"));
    assert_eq!(records[0].glucose, Some(5.6));
    assert_eq!(records[1].weight, None);
    assert_eq!(records[2].date.to_string(), "2023-11-01");

    context.records().fetch_records(false).await?;
    assert_eq!(server.received_requests().await.unwrap().len(), 1);

    context.records().fetch_records(true).await?;
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_derived_metrics_follow_snapshot() -> Result<()> {
    let server = MockServer::start().await;
    mount_month_records(&server).await;
    let context = context_for(&server);
    let records = context.records();

    assert_eq!(records.glucose_average(), None);
    assert_eq!(records.glucose_status().status, HealthStatus::Unknown);
    assert!(records.forecast().is_empty());

    records.fetch_records(false).await?;
    assert_eq!(records.glucose_average(), Some(5.4));
    assert_eq!(records.weight_average(), Some(70.2));
    assert_eq!(records.blood_pressure_average().as_deref(), Some("120/79"));
    assert_eq!(records.glucose_status().status, HealthStatus::Normal);
    assert_eq!(records.blood_pressure_status().status, HealthStatus::Normal);
    assert_eq!(records.forecast().len(), 7);

    let metrics = records.metrics();
    assert_eq!(metrics.rejected_readings, 1);
    assert_eq!(metrics.composite_score, records.composite_score());
    assert_eq!(metrics.completeness, records.completeness());
    assert_eq!(metrics.advice, records.advice());
    Ok(())
}

#[tokio::test]
async fn test_add_inserts_at_front() -> Result<()> {
    let server = MockServer::start().await;
    mount_month_records(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/user/health-records/add"))
        .and(body_partial_json(json!({ "glucose": 6.8, "bloodPressure": "130/85" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true, "recordId": 9 })))
        .expect(1)
        .mount(&server)
        .await;
    let context = context_for(&server);
    context.records().fetch_records(false).await?;

    let created = context
        .records()
        .add_record(NewRecord {
            glucose: Some(6.8),
            blood_pressure: Some("130/85".to_owned()),
            note: "after dinner".to_owned(),
            ..NewRecord::default()
        })
        .await?;

    assert_eq!(created.id, RecordId::new("9"));
    let local = context.records().records();
    assert_eq!(local.len(), 4);
    assert_eq!(local[0].id, RecordId::new("9"));
    assert_eq!(local[0].note, "after dinner");
    Ok(())
}

#[tokio::test]
async fn test_add_without_returned_id_reports_bounded_snippet() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/health-records/add"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "detail": "x".repeat(500) })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let context = context_for(&server);

    let error = context
        .api()
        .create_record(&NewRecord::default())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::MalformedResponse);
    let snippet = error.context.details["snippet"].as_str().unwrap();
    assert_eq!(snippet.chars().count(), MALFORMED_SNIPPET_CHARS);
    assert!(snippet.starts_with('{'));
}

#[tokio::test]
async fn test_add_rejects_malformed_blood_pressure_locally() {
    let server = MockServer::start().await;
    let context = context_for(&server);

    let error = context
        .records()
        .add_record(NewRecord {
            blood_pressure: Some("120-80".to_owned()),
            ..NewRecord::default()
        })
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ValidationError);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_and_delete_reconcile_local_view() -> Result<()> {
    let server = MockServer::start().await;
    mount_month_records(&server).await;
    Mock::given(method("PUT"))
        .and(path("/api/user/health-records/2"))
        .and(body_partial_json(json!({ "weight": 69.9 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/user/health-records/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let context = context_for(&server);
    context.records().fetch_records(false).await?;

    let patch = RecordPatch {
        weight: Some(69.9),
        ..RecordPatch::default()
    };
    context
        .records()
        .update_record(&RecordId::new("2"), &patch)
        .await?;
    context.records().delete_record(&RecordId::new("3")).await?;

    let local = context.records().records();
    assert_eq!(local.len(), 2);
    assert_eq!(local[0].id, RecordId::new("2"));
    assert_eq!(local[0].weight, Some(69.9));
    assert_eq!(local[0].glucose, Some(5.4));
    Ok(())
}

#[tokio::test]
async fn test_empty_update_is_rejected_without_request() {
    let server = MockServer::start().await;
    let context = context_for(&server);

    let error = context
        .records()
        .update_record(&RecordId::new("1"), &RecordPatch::default())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ValidationError);
    assert_eq!(error.context.resource_id.as_deref(), Some("1"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_period_selection_uses_date_range() -> Result<()> {
    let server = MockServer::start().await;
    mount_month_records(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/user/health-records"))
        .and(query_param("dateRange", "week"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "w1", "date": "2023-11-03", "glucose": 5.9 }
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let context = context_for(&server);

    context.records().fetch_records(false).await?;
    let week = context.records().set_period(Period::Week).await?;

    assert_eq!(week.len(), 1);
    assert_eq!(context.cache().current_period(), Period::Week);
    assert_eq!(context.records().glucose_average(), Some(5.9));
    Ok(())
}

#[tokio::test]
async fn test_clear_cache_and_sign_out_drop_local_view() -> Result<()> {
    let server = MockServer::start().await;
    mount_month_records(&server).await;
    let context = context_for(&server);

    context.records().fetch_records(false).await?;
    context.records().clear_cache();
    assert!(context.records().records().is_empty());

    context.records().fetch_records(false).await?;
    context.session().sign_out();
    assert!(context.records().records().is_empty());
    assert!(!context.cache().is_loaded());
    Ok(())
}

#[tokio::test]
async fn test_sign_in_grants_admin_calls() -> Result<()> {
    let server = MockServer::start().await;
    let token = valid_token();
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_partial_json(json!({ "email": "admin@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": token,
            "user": { "id": 1, "role_id": 2 }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "users": [] })))
        .expect(1)
        .mount(&server)
        .await;
    let context = context_for(&server);

    let error = context.api().list_users().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::PermissionDenied);

    let credential = context.api().sign_in("admin@example.com", "secret").await?;
    assert_eq!(credential.role(), Role::Admin);
    assert!(context.session().is_admin());

    let users = context.api().list_users().await?;
    assert_eq!(users, json!({ "users": [] }));
    Ok(())
}

#[tokio::test]
async fn test_admin_calls_require_sign_in() {
    let server = MockServer::start().await;
    init_test_logging();
    let context = ClientContext::with_sleeper(
        mock_config(&server),
        Arc::new(RecordingSleeper::default()),
    )
    .unwrap();

    let error = context.api().list_users().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::AuthRequired);

    let error = context
        .api()
        .upload_dataset("readings.csv", b"date,glucose\n".to_vec())
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::AuthRequired);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_guide_and_feedback() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/health-guide"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tips": ["walk daily"] })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/user/feedback"))
        .and(body_partial_json(json!({ "content": "great app" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    let context = context_for(&server);

    let guide = context.api().health_guide().await?;
    assert_eq!(guide["tips"][0], "walk daily");

    context
        .api()
        .submit_feedback(&Feedback {
            content: "great app".to_owned(),
            contact: None,
        })
        .await?;

    let error = context
        .api()
        .submit_feedback(&Feedback {
            content: "   ".to_owned(),
            contact: None,
        })
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ValidationError);
    Ok(())
}
