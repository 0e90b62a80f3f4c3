// ABOUTME: Configuration module for the VitalTrack client
// ABOUTME: Environment-only configuration; no config files are read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

/// Environment-based client configuration
pub mod environment;

pub use environment::ClientConfig;
