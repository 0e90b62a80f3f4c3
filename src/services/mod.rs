// ABOUTME: Service layer exposing record operations and derived metrics to callers
// ABOUTME: Combines the endpoint bindings, the record cache, and the analytics engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

//! Service layer
//!
//! Services are what a UI or the CLI talks to. They own no state of their
//! own; everything flows through the injected cache and API handles.

/// Health record operations and derived metric getters
pub mod health_records;

pub use health_records::HealthRecordsService;
