// ABOUTME: Cache-related constants for record freshness
// ABOUTME: Defines the default TTL and reporting period for the record cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

/// Record collection freshness window
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300; // 5 minutes

/// Reporting period requested before the user picks one
pub const DEFAULT_PERIOD: &str = "month";
