// ABOUTME: Record completeness and composite wellness score
// ABOUTME: Monotonic, auditable scoring from status bands and data coverage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

use vitaltrack_core::models::HealthRecord;

use crate::status::HealthStatus;
use crate::thresholds::{COMPLETENESS_DIVISOR, SCORE_BASE, SCORE_MAX, SCORE_MIN};

const TRACKED_FIELDS: f64 = 3.0;

/// Share of tracked fields present, averaged over records, as 0-100
///
/// Each record contributes the fraction of glucose, weight and blood pressure
/// it carries. An empty collection scores 0.
#[must_use]
pub fn completeness(records: &[HealthRecord]) -> u8 {
    if records.is_empty() {
        return 0;
    }
    let total: f64 = records
        .iter()
        .map(|r| {
            let present = [
                r.glucose_value().is_some(),
                r.weight_value().is_some(),
                r.blood_pressure_text().is_some(),
            ]
            .into_iter()
            .filter(|p| *p)
            .count();
            present as f64 / TRACKED_FIELDS
        })
        .sum();

    (total / records.len() as f64 * 100.0).round() as u8
}

const fn glucose_adjustment(status: HealthStatus) -> f64 {
    match status {
        HealthStatus::Normal => 10.0,
        HealthStatus::High => -10.0,
        HealthStatus::Low => -8.0,
        HealthStatus::Danger => -15.0,
        HealthStatus::Borderline | HealthStatus::Unknown => 0.0,
    }
}

const fn blood_pressure_adjustment(status: HealthStatus) -> f64 {
    match status {
        HealthStatus::Normal => 10.0,
        HealthStatus::High => -10.0,
        HealthStatus::Low => -5.0,
        HealthStatus::Borderline | HealthStatus::Danger | HealthStatus::Unknown => 0.0,
    }
}

/// Composite 0-100 wellness score
///
/// Base 80, plus status adjustments, plus one point per 10% completeness
/// (fractional until the final rounding).
#[must_use]
pub fn composite_score(glucose: HealthStatus, blood_pressure: HealthStatus, completeness: u8) -> u8 {
    let score = SCORE_BASE
        + glucose_adjustment(glucose)
        + blood_pressure_adjustment(blood_pressure)
        + f64::from(completeness) / COMPLETENESS_DIVISOR;

    score.clamp(SCORE_MIN, SCORE_MAX).round() as u8
}
