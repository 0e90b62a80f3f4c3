// ABOUTME: Core data models for health records and reporting windows
// ABOUTME: Re-exports record, period, and blood-pressure types for the workspace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

mod blood_pressure;
mod lenient;
mod period;
mod record;

pub use blood_pressure::BloodPressure;
pub use period::Period;
pub use record::{HealthRecord, NewRecord, RecordId, RecordPatch};
