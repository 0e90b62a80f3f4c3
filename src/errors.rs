// ABOUTME: Error types re-exported from the core crate for library consumers
// ABOUTME: Keeps `vitaltrack::errors::AppError` stable regardless of crate layout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

pub use vitaltrack_core::errors::{AppError, AppResult, ErrorCode, ErrorContext};
