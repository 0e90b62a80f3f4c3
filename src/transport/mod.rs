// ABOUTME: Sanitizing HTTP transport for the remote record service
// ABOUTME: Attaches credentials, repairs malformed bodies, and retries transient failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

//! # Sanitizing Transport
//!
//! Every remote call goes through [`Transport::request`]. A call is retried in
//! a bounded loop when it fails transiently:
//!
//! - network failures for any method (writes too, unless disabled in the
//!   [`RetryPolicy`])
//! - bodies that stay unparseable after the repair pass, for reads only
//!
//! Non-success statuses are never retried.

/// Request payloads and query-string encoding
pub mod body;
/// Retry policy and injectable backoff
pub mod retry;
/// Non-finite token repair pass
pub mod sanitize;

use std::sync::Arc;

use reqwest::{Client, ClientBuilder, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;
use vitaltrack_core::constants::transport::{NETWORK_ERROR_MESSAGE, USER_AGENT};
use vitaltrack_core::{AppError, AppResult};

use crate::config::ClientConfig;
use crate::session::Session;

pub use body::{MultipartField, MultipartPayload, RequestBody};
pub use reqwest::Method;
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};

/// HTTP transport bound to one API base and one session
pub struct Transport {
    client: Client,
    config: ClientConfig,
    session: Arc<Session>,
    retry: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl Transport {
    /// Build a transport from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built
    pub fn new(config: ClientConfig, session: Arc<Session>) -> AppResult<Self> {
        let client = ClientBuilder::new()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::config("failed to build HTTP client").with_source(e))?;
        let retry = RetryPolicy::new(config.max_retries, config.retry_base_delay);

        Ok(Self {
            client,
            config,
            session,
            retry,
            sleeper: Arc::new(TokioSleeper),
        })
    }

    /// Replace the retry policy
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the backoff sleeper
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Configuration the transport was built from
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Session supplying credentials
    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Issue a call and return the parsed body; `None` for an empty body
    ///
    /// # Errors
    ///
    /// - `NetworkError` once network retries are exhausted
    /// - `TransportError` with the status for any non-success response
    /// - `MalformedResponse` with a body excerpt when the body is unreadable
    /// - `ValidationError` for a payload the method cannot carry
    pub async fn request(
        &self,
        path: &str,
        method: Method,
        body: Option<RequestBody>,
    ) -> AppResult<Option<Value>> {
        let request_id = Uuid::new_v4().to_string();
        let url = self.build_url(path, &method, body.as_ref())?;
        debug!(%request_id, %method, path, "Transport request");

        let mut retries: u32 = 0;
        loop {
            match self.send_once(&url, &method, body.as_ref()).await {
                Ok(value) => return Ok(value),
                Err(e) if self.retry.should_retry(&method, &e, retries) => {
                    retries += 1;
                    let delay = self.retry.delay_for(retries);
                    warn!(
                        %request_id,
                        %method,
                        path,
                        retry = retries,
                        max_retries = self.retry.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Transient transport failure, retrying"
                    );
                    self.sleeper.sleep(delay).await;
                }
                Err(e) => {
                    debug!(%request_id, %method, path, error = %e, "Transport request failed");
                    return Err(e.with_request_id(request_id));
                }
            }
        }
    }

    fn build_url(&self, path: &str, method: &Method, body: Option<&RequestBody>) -> AppResult<Url> {
        let mut url = self
            .config
            .endpoint_url(path)
            .map_err(|e| AppError::invalid_input(e.to_string()))?;

        if retry::is_read(method) {
            match body {
                Some(RequestBody::Json(params)) => body::append_query(&mut url, params)?,
                Some(RequestBody::Multipart(_)) => {
                    return Err(AppError::invalid_input(format!(
                        "{method} requests cannot carry a multipart body"
                    )));
                }
                None => {}
            }
        }
        Ok(url)
    }

    async fn send_once(
        &self,
        url: &Url,
        method: &Method,
        body: Option<&RequestBody>,
    ) -> AppResult<Option<Value>> {
        let mut builder = self.client.request(method.clone(), url.clone());

        if let Some(credential) = self.session.current_credential() {
            builder = builder.bearer_auth(credential.token());
        }

        if carries_body(method) {
            builder = match body {
                Some(RequestBody::Json(payload)) => builder.json(payload),
                Some(RequestBody::Multipart(payload)) => builder.multipart(payload.to_form()?),
                None => builder,
            };
        }

        let response = builder.send().await.map_err(classify_send_error)?;
        let status = response.status();
        let text = response.text().await.map_err(classify_send_error)?;

        if !status.is_success() {
            return Err(status_error(status, &text));
        }
        parse_success_body(&text)
    }
}

/// POST, PUT and PATCH send a body; other methods never do
fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

fn classify_send_error(error: reqwest::Error) -> AppError {
    if error.is_builder() {
        AppError::internal(format!("invalid request: {error}")).with_source(error)
    } else {
        AppError::network(NETWORK_ERROR_MESSAGE).with_source(error)
    }
}

fn status_error(status: StatusCode, text: &str) -> AppError {
    let fallback = format!("server error ({})", status.as_u16());
    let message = match sanitize::parse_lenient(text) {
        Ok(Value::Object(body)) => ["message", "error"]
            .iter()
            .find_map(|key| match body.get(*key) {
                None | Some(Value::Null) => None,
                Some(Value::String(message)) => Some(message.clone()),
                Some(other) => Some(other.to_string()),
            })
            .unwrap_or(fallback),
        Ok(_) => fallback,
        Err(_) if !text.trim().is_empty() => text.trim().to_owned(),
        Err(_) => fallback,
    };
    AppError::transport(status.as_u16(), message)
}

fn parse_success_body(text: &str) -> AppResult<Option<Value>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    sanitize::parse_lenient(text)
        .map(Some)
        .map_err(|e| AppError::malformed_response(text).with_source(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitaltrack_core::constants::transport::MALFORMED_SNIPPET_CHARS;
    use vitaltrack_core::ErrorCode;

    #[test]
    fn test_status_error_prefers_message_then_error() {
        let error = status_error(StatusCode::BAD_REQUEST, r#"{"message":"bad date","error":"x"}"#);
        assert_eq!(error.message, "bad date");
        assert_eq!(error.status(), Some(400));

        let error = status_error(StatusCode::FORBIDDEN, r#"{"error":"forbidden"}"#);
        assert_eq!(error.message, "forbidden");

        let error = status_error(StatusCode::FORBIDDEN, r#"{"message":null,"error":"denied"}"#);
        assert_eq!(error.message, "denied");
    }

    #[test]
    fn test_status_error_stringifies_structured_messages() {
        let error = status_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message":{"field":"glucose","reason":"out of range"}}"#,
        );
        assert_eq!(error.message, r#"{"field":"glucose","reason":"out of range"}"#);

        let error = status_error(StatusCode::BAD_REQUEST, r#"{"error":42}"#);
        assert_eq!(error.message, "42");
    }

    #[test]
    fn test_status_error_fallbacks() {
        let error = status_error(StatusCode::BAD_GATEWAY, "");
        assert_eq!(error.message, "server error (502)");

        let error = status_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(error.message, "upstream down");

        let error = status_error(StatusCode::INTERNAL_SERVER_ERROR, "[1,2]");
        assert_eq!(error.message, "server error (500)");
    }

    #[test]
    fn test_empty_success_body_is_none() {
        assert!(parse_success_body("  \n").unwrap().is_none());
    }

    #[test]
    fn test_malformed_snippet_is_bounded() {
        let body = format!("<html>{}</html>", "x".repeat(500));
        let error = parse_success_body(&body).unwrap_err();
        assert_eq!(error.code, ErrorCode::MalformedResponse);
        let snippet = error.context.details["snippet"].as_str().unwrap();
        assert_eq!(snippet.chars().count(), MALFORMED_SNIPPET_CHARS);
    }
}
