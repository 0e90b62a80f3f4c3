// ABOUTME: Core types and constants for the VitalTrack health-record client
// ABOUTME: Foundation crate with error handling, record models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

#![deny(unsafe_code)]

//! # `VitalTrack` Core
//!
//! Foundation crate providing shared types and constants for the `VitalTrack`
//! client. This crate performs no I/O so that the analytics engine and the
//! network layer can both depend on it.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Client-wide defaults organized by domain
//! - **models**: Health records, reporting periods, and blood-pressure readings

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants and configuration defaults organized by domain
pub mod constants;

/// Core data models (`HealthRecord`, `Period`, `BloodPressure`)
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode, ErrorContext};
