// ABOUTME: Bounded retry policy for transient transport failures
// ABOUTME: Linear backoff through an injectable sleeper so tests need no real time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use vitaltrack_core::constants::transport::{DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BASE_DELAY_MS};
use vitaltrack_core::{AppError, ErrorCode};

/// Suspends the retry chain between attempts
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Wait for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// When and how long to wait before repeating a request
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Retry `n` waits `n` times this
    pub base_delay: Duration,
    /// Repeat writes after a network failure
    ///
    /// A write whose response was lost may already have been applied, so a
    /// retry can execute it twice. Disable for at-most-once writes.
    pub retry_writes_on_network_error: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_millis(DEFAULT_RETRY_BASE_DELAY_MS),
            retry_writes_on_network_error: true,
        }
    }
}

impl RetryPolicy {
    /// Policy with the given bound and backoff unit
    #[must_use]
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            ..Self::default()
        }
    }

    /// Whether a request that failed with `error` gets another attempt
    ///
    /// `retries_so_far` counts retries already issued, not the first attempt.
    #[must_use]
    pub fn should_retry(&self, method: &Method, error: &AppError, retries_so_far: u32) -> bool {
        if retries_so_far >= self.max_retries {
            return false;
        }
        match error.code {
            ErrorCode::NetworkError => is_read(method) || self.retry_writes_on_network_error,
            ErrorCode::MalformedResponse => is_read(method),
            _ => false,
        }
    }

    /// Delay before retry number `retry` (1-based)
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay.saturating_mul(retry)
    }
}

/// Reads may be repeated freely; everything else mutates server state
#[must_use]
pub fn is_read(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD)
}
