// ABOUTME: Unified error handling for the VitalTrack client with standard error codes
// ABOUTME: Classifies network, transport, payload, validation, and configuration failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

//! # Unified Error Handling System
//!
//! Every fallible operation in the workspace returns [`AppResult`]. The
//! [`ErrorCode`] decides whether a failure is transient (retried locally by the
//! transport) or surfaced to the caller unchanged.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::transport::MALFORMED_SNIPPET_CHARS;

/// Standard error codes used throughout the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ErrorCode {
    // Authentication (1000-1999)
    /// A credential is required for this call
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired = 1000,
    /// The signed-in role may not perform this call
    #[serde(rename = "PERMISSION_DENIED")]
    PermissionDenied = 1004,

    // Validation (3000-3999)
    /// Input failed local validation
    #[serde(rename = "VALIDATION_ERROR")]
    ValidationError = 3000,

    // Remote service (5000-5999)
    /// Connection refused, timed out, or DNS failure
    #[serde(rename = "NETWORK_ERROR")]
    NetworkError = 5000,
    /// Server answered with a non-success status
    #[serde(rename = "TRANSPORT_ERROR")]
    TransportError = 5001,
    /// Server body could not be parsed even after the repair pass
    #[serde(rename = "MALFORMED_RESPONSE")]
    MalformedResponse = 5002,

    // Configuration (6000-6999)
    /// Configuration value missing or unusable
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Local serialization or deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required",
            Self::PermissionDenied => "You do not have permission to perform this action",
            Self::ValidationError => "The provided input is invalid",
            Self::NetworkError => "The server could not be reached",
            Self::TransportError => "The server rejected the request",
            Self::MalformedResponse => "The server returned an unreadable response",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether a failure with this code may succeed when the request is repeated
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::NetworkError | Self::MalformedResponse)
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Correlation ID of the transport call that failed
    pub request_id: Option<String>,
    /// Record identifier if applicable
    pub resource_id: Option<String>,
    /// HTTP status returned by the server, for transport errors
    pub status: Option<u16>,
    /// Additional key-value context
    pub details: serde_json::Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            request_id: None,
            resource_id: None,
            status: None,
            details: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// Unified error type for the client
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add a request ID to the error context
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.context.request_id = Some(request_id.into());
        self
    }

    /// Add a record ID to the error context
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.context.resource_id = Some(resource_id.into());
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// HTTP status carried by a transport error
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.context.status
    }

    /// Whether the transport may repeat the request that produced this error
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.code.is_transient()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience functions for creating common errors
impl AppError {
    /// Authentication required
    #[must_use]
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, "Authentication required")
    }

    /// Role lacks permission
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PermissionDenied, message)
    }

    /// The server could not be reached
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NetworkError, message)
    }

    /// Non-success HTTP status from the server
    pub fn transport(status: u16, message: impl Into<String>) -> Self {
        let mut error = Self::new(ErrorCode::TransportError, message);
        error.context.status = Some(status);
        error
    }

    /// Unparseable server body; keeps only the leading characters of `body`
    pub fn malformed_response(body: impl AsRef<str>) -> Self {
        let snippet: String = body.as_ref().chars().take(MALFORMED_SNIPPET_CHARS).collect();
        Self::new(
            ErrorCode::MalformedResponse,
            format!("response is not valid JSON: {snippet}"),
        )
        .with_details(serde_json::json!({ "snippet": snippet }))
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string()).with_source(error)
    }
}

/// Conversion from `anyhow::Error` used by configuration and CLI glue
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        match error.source() {
            Some(source) => Self::new(ErrorCode::InternalError, error.to_string())
                .with_details(serde_json::json!({ "source": source.to_string() })),
            None => Self::new(ErrorCode::InternalError, error.to_string()),
        }
    }
}
