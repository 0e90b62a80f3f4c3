// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for transport, cache, endpoints, and session handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Cache-related constants (TTL, default period)
pub mod cache;
/// Remote endpoint paths
pub mod endpoints;
/// Transport defaults (timeouts, retry bounds, messages)
pub mod transport;

/// Session and role constants
pub mod session {
    /// Server role identifier granting administrative rights
    pub const ADMIN_ROLE_ID: i64 = 2;
    /// Number of dot-separated segments in a well-formed bearer token
    pub const TOKEN_SEGMENTS: usize = 3;
}

/// Environment variable names read by the configuration layer
pub mod env_vars {
    /// API base URL
    pub const API_BASE: &str = "VITALTRACK_API_BASE";
    /// Whole-request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: &str = "VITALTRACK_REQUEST_TIMEOUT_SECS";
    /// Connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: &str = "VITALTRACK_CONNECT_TIMEOUT_SECS";
    /// Retry bound for transient failures
    pub const MAX_RETRIES: &str = "VITALTRACK_MAX_RETRIES";
    /// Base backoff delay in milliseconds
    pub const RETRY_BASE_DELAY_MS: &str = "VITALTRACK_RETRY_BASE_DELAY_MS";
    /// Cache freshness window in seconds
    pub const CACHE_TTL_SECS: &str = "VITALTRACK_CACHE_TTL_SECS";
    /// Reporting period used on startup
    pub const DEFAULT_PERIOD: &str = "VITALTRACK_DEFAULT_PERIOD";
    /// Pre-issued bearer token
    pub const TOKEN: &str = "VITALTRACK_TOKEN";
}
