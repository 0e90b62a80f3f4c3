// ABOUTME: Re-exports command modules for vitaltrack-cli
// ABOUTME: Provides access to record and account commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

pub mod account;
pub mod records;
