// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging setup, token builders, mock-server configuration, and a recording sleeper
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `vitaltrack`

use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{NaiveDate, Utc};
use serde_json::json;
use url::Url;
use vitaltrack::config::ClientConfig;
use vitaltrack::models::{HealthRecord, RecordId};
use vitaltrack::session::Session;
use vitaltrack::transport::{Sleeper, Transport};
use wiremock::MockServer;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// JWT-shaped token whose payload carries `exp` at `offset_secs` from now
pub fn token_expiring_in(offset_secs: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = json!({ "sub": "user-1", "exp": Utc::now().timestamp() + offset_secs });
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.signature")
}

/// Token valid for an hour
pub fn valid_token() -> String {
    token_expiring_in(3600)
}

/// Token that expired an hour ago
pub fn expired_token() -> String {
    token_expiring_in(-3600)
}

/// Client configuration pointing at a mock server's `/api` prefix
pub fn mock_config(server: &MockServer) -> ClientConfig {
    let api_base = Url::parse(&format!("{}/api", server.uri())).unwrap();
    ClientConfig::with_api_base(api_base)
}

/// Records every requested backoff without waiting
#[derive(Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

/// Transport bound to `config` with a recording sleeper
pub fn recording_transport(
    config: ClientConfig,
    session: Arc<Session>,
) -> (Transport, Arc<RecordingSleeper>) {
    init_test_logging();
    let sleeper = Arc::new(RecordingSleeper::default());
    let transport = Transport::new(config, session)
        .unwrap()
        .with_sleeper(sleeper.clone());
    (transport, sleeper)
}

/// Bare record on 2023-11-`day`
pub fn record_on(id: &str, day: u32) -> HealthRecord {
    HealthRecord {
        id: RecordId::new(id),
        date: NaiveDate::from_ymd_opt(2023, 11, day).unwrap(),
        time: None,
        measure_type: None,
        glucose: None,
        weight: None,
        blood_pressure: None,
        note: String::new(),
    }
}
