// ABOUTME: Transport defaults for timeouts, retry bounds, and failure messages
// ABOUTME: Shared by the configuration layer and the sanitizing transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

/// API base used when none is configured
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000/api";

/// Whole-request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection establishment timeout
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Retries after the first attempt for transient failures
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Backoff unit; attempt `n` waits `n` times this value
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1_000;

/// Characters of an unparseable body kept in the error
pub const MALFORMED_SNIPPET_CHARS: usize = 100;

/// User-presentable message for exhausted network retries
pub const NETWORK_ERROR_MESSAGE: &str = "cannot reach server";

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("vitaltrack/", env!("CARGO_PKG_VERSION"));
