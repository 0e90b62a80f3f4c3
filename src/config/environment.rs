// ABOUTME: Environment configuration for the API endpoint, timeouts, retries, and cache
// ABOUTME: Parses VITALTRACK_* variables with defaults and validates the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

//! Environment-based configuration

use std::env;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::{debug, info};
use url::Url;
use vitaltrack_core::constants::{cache, env_vars, transport};
use vitaltrack_core::models::Period;

/// Everything the client needs to reach the record service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL; endpoint paths are appended to it
    pub api_base: Url,
    /// Whole-request timeout
    pub request_timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
    /// Retries after the first attempt for transient failures
    pub max_retries: u32,
    /// Backoff unit; retry `n` waits `n` times this
    pub retry_base_delay: Duration,
    /// Record collection freshness window
    pub cache_ttl: Duration,
    /// Reporting period selected on startup
    pub default_period: Period,
    /// Pre-issued bearer token
    pub token: Option<String>,
}

impl ClientConfig {
    /// Configuration with default timeouts, retries, and cache settings
    #[must_use]
    pub fn with_api_base(api_base: Url) -> Self {
        Self {
            api_base,
            request_timeout: Duration::from_secs(transport::DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(transport::DEFAULT_CONNECT_TIMEOUT_SECS),
            max_retries: transport::DEFAULT_MAX_RETRIES,
            retry_base_delay: Duration::from_millis(transport::DEFAULT_RETRY_BASE_DELAY_MS),
            cache_ttl: Duration::from_secs(cache::DEFAULT_CACHE_TTL_SECS),
            default_period: Period::default(),
            token: None,
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value or the
    /// resulting configuration fails validation
    pub fn from_env() -> Result<Self> {
        debug!("Loading client configuration from environment variables");

        let config = Self {
            api_base: Url::parse(&env_var_or(env_vars::API_BASE, transport::DEFAULT_API_BASE))
                .context("Invalid VITALTRACK_API_BASE value")?,
            request_timeout: Duration::from_secs(
                env_var_or(
                    env_vars::REQUEST_TIMEOUT_SECS,
                    &transport::DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid VITALTRACK_REQUEST_TIMEOUT_SECS value")?,
            ),
            connect_timeout: Duration::from_secs(
                env_var_or(
                    env_vars::CONNECT_TIMEOUT_SECS,
                    &transport::DEFAULT_CONNECT_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid VITALTRACK_CONNECT_TIMEOUT_SECS value")?,
            ),
            max_retries: env_var_or(
                env_vars::MAX_RETRIES,
                &transport::DEFAULT_MAX_RETRIES.to_string(),
            )
            .parse()
            .context("Invalid VITALTRACK_MAX_RETRIES value")?,
            retry_base_delay: Duration::from_millis(
                env_var_or(
                    env_vars::RETRY_BASE_DELAY_MS,
                    &transport::DEFAULT_RETRY_BASE_DELAY_MS.to_string(),
                )
                .parse()
                .context("Invalid VITALTRACK_RETRY_BASE_DELAY_MS value")?,
            ),
            cache_ttl: Duration::from_secs(
                env_var_or(
                    env_vars::CACHE_TTL_SECS,
                    &cache::DEFAULT_CACHE_TTL_SECS.to_string(),
                )
                .parse()
                .context("Invalid VITALTRACK_CACHE_TTL_SECS value")?,
            ),
            default_period: env_var_or(env_vars::DEFAULT_PERIOD, cache::DEFAULT_PERIOD)
                .parse()
                .context("Invalid VITALTRACK_DEFAULT_PERIOD value")?,
            token: env::var(env_vars::TOKEN)
                .ok()
                .map(|t| t.trim().to_owned())
                .filter(|t| !t.is_empty()),
        };

        config.validate()?;
        info!("{}", config.summary());
        Ok(config)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot carry paths or a timeout is zero
    pub fn validate(&self) -> Result<()> {
        if self.api_base.cannot_be_a_base() {
            bail!("VITALTRACK_API_BASE must be an http(s) URL");
        }
        if !matches!(self.api_base.scheme(), "http" | "https") {
            bail!(
                "VITALTRACK_API_BASE scheme must be http or https, got {}",
                self.api_base.scheme()
            );
        }
        if self.request_timeout.is_zero() || self.connect_timeout.is_zero() {
            bail!("Timeouts must be greater than zero");
        }
        Ok(())
    }

    /// Full URL for an endpoint path such as `/user/health-records`
    ///
    /// # Errors
    ///
    /// Returns an error if the joined string is not a valid URL
    pub fn endpoint_url(&self, path: &str) -> Result<Url> {
        let joined = format!(
            "{}/{}",
            self.api_base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).with_context(|| format!("Invalid endpoint path {path}"))
    }

    /// Summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "VitalTrack client configuration: api_base={} request_timeout={}s connect_timeout={}s \
             max_retries={} retry_base_delay={}ms cache_ttl={}s default_period={} token={}",
            self.api_base,
            self.request_timeout.as_secs(),
            self.connect_timeout.as_secs(),
            self.max_retries,
            self.retry_base_delay.as_millis(),
            self.cache_ttl.as_secs(),
            self.default_period,
            if self.token.is_some() { "set" } else { "unset" },
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
