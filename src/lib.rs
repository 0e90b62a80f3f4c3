// ABOUTME: Main library entry point for the VitalTrack health-record client
// ABOUTME: Resilient transport, period-scoped record cache, session facade, and record service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

#![deny(unsafe_code)]

//! # `VitalTrack`
//!
//! Client for a remote health-record service. Users submit periodic
//! biometric readings (glucose, weight, blood pressure) and receive status
//! assessments, a short glucose forecast, and a composite wellness score.
//!
//! ## Architecture
//!
//! - **Transport**: every remote call, with credential attachment, repair of
//!   non-finite number tokens, and bounded retries for transient failures
//! - **Cache**: the record collection for one reporting period, fresh for a
//!   configurable window
//! - **Session**: the current credential; clearing it invalidates the cache
//! - **Services**: record operations plus derived metrics computed by
//!   [`analytics`] from the cached snapshot
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use vitaltrack::config::ClientConfig;
//! use vitaltrack::context::ClientContext;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let context = ClientContext::from_config(ClientConfig::from_env()?)?;
//! context.records().fetch_records(false).await?;
//! println!("score: {}", context.records().composite_score());
//! # Ok(())
//! # }
//! ```

/// Typed bindings for the remote endpoints
pub mod api;

/// Period-scoped record cache
pub mod cache;

/// Environment configuration
pub mod config;

/// Explicit wiring of the long-lived client handles
pub mod context;

/// Error types shared across the client
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Record service consumed by presentation layers
pub mod services;

/// Credential holder and sign-out notification
pub mod session;

/// Sanitizing HTTP transport
pub mod transport;

pub use vitaltrack_analytics as analytics;
pub use vitaltrack_core::{constants, models};
