// ABOUTME: Arithmetic means over the present values of a record collection
// ABOUTME: Glucose and weight rounded to one decimal, blood pressure to whole mmHg
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

use tracing::debug;
use vitaltrack_core::models::{BloodPressure, HealthRecord, RecordId};
use vitaltrack_core::AppError;

use crate::round_tenth;

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Mean glucose of records carrying a finite value, to one decimal
#[must_use]
pub fn average_glucose(records: &[HealthRecord]) -> Option<f64> {
    mean(records.iter().filter_map(HealthRecord::glucose_value)).map(round_tenth)
}

/// Mean weight of records carrying a finite value, to one decimal
#[must_use]
pub fn average_weight(records: &[HealthRecord]) -> Option<f64> {
    mean(records.iter().filter_map(HealthRecord::weight_value)).map(round_tenth)
}

/// Blood pressure readings split into usable values and per-record rejections
#[derive(Debug, Default)]
pub struct BloodPressureReadings {
    /// Successfully parsed readings
    pub readings: Vec<BloodPressure>,
    /// Records whose reading could not be parsed
    pub rejected: Vec<(RecordId, AppError)>,
}

impl BloodPressureReadings {
    /// Parse every record that carries a blood pressure text
    #[must_use]
    pub fn collect(records: &[HealthRecord]) -> Self {
        let mut out = Self::default();
        for record in records {
            let Some(raw) = record.blood_pressure_text() else {
                continue;
            };
            match BloodPressure::parse(raw) {
                Ok(bp) => out.readings.push(bp),
                Err(e) => {
                    debug!(record_id = %record.id, reading = raw, "Excluding malformed blood pressure");
                    out.rejected.push((record.id.clone(), e));
                }
            }
        }
        out
    }

    /// Per-side means rounded to whole mmHg
    #[must_use]
    pub fn average(&self) -> Option<BloodPressure> {
        let systolic = mean(self.readings.iter().map(|bp| f64::from(bp.systolic)))?;
        let diastolic = mean(self.readings.iter().map(|bp| f64::from(bp.diastolic)))?;
        Some(BloodPressure {
            systolic: systolic.round() as u32,
            diastolic: diastolic.round() as u32,
        })
    }
}

/// Mean blood pressure over well-formed readings; malformed ones are skipped
#[must_use]
pub fn average_blood_pressure(records: &[HealthRecord]) -> Option<BloodPressure> {
    BloodPressureReadings::collect(records).average()
}
