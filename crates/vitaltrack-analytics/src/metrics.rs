// ABOUTME: Assembles every derived value for a record snapshot in one pass
// ABOUTME: Recomputed on each read so presentation never shows stale aggregates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

use serde::{Deserialize, Serialize};
use vitaltrack_core::models::HealthRecord;

use crate::advice::generate_advice;
use crate::averages::{average_glucose, average_weight, BloodPressureReadings};
use crate::forecast::{forecast, ForecastPoint};
use crate::score::{completeness, composite_score};
use crate::status::{
    classify_blood_pressure, evaluate_blood_pressure, evaluate_glucose, StatusAssessment,
};
use crate::thresholds::DEFAULT_FORECAST_DAYS;

/// Presentation-ready metrics for a record collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    /// Mean glucose, one decimal
    pub glucose_average: Option<f64>,
    /// Mean weight, one decimal
    pub weight_average: Option<f64>,
    /// Mean blood pressure as `"S/D"`
    pub blood_pressure_average: Option<String>,
    /// Classification of the glucose average
    pub glucose_status: StatusAssessment,
    /// Classification of the blood pressure average
    pub blood_pressure_status: StatusAssessment,
    /// Field coverage, 0-100
    pub completeness: u8,
    /// Ordered recommendations
    pub advice: Vec<String>,
    /// Projected glucose values
    pub forecast: Vec<ForecastPoint>,
    /// Composite wellness score, 0-100
    pub composite_score: u8,
    /// Records whose blood pressure was excluded as malformed
    pub rejected_readings: usize,
}

/// Derive every metric from one snapshot
#[must_use]
pub fn derive_metrics(records: &[HealthRecord]) -> DerivedMetrics {
    let glucose_average = average_glucose(records);
    let readings = BloodPressureReadings::collect(records);
    let blood_pressure = readings.average();

    let glucose_status = evaluate_glucose(glucose_average);
    let blood_pressure_status =
        blood_pressure.map_or_else(|| evaluate_blood_pressure(None), classify_blood_pressure);
    let completeness = completeness(records);

    DerivedMetrics {
        glucose_average,
        weight_average: average_weight(records),
        blood_pressure_average: blood_pressure.map(|bp| bp.to_string()),
        advice: generate_advice(
            glucose_status.status,
            blood_pressure_status.status,
            records.len(),
        ),
        forecast: forecast(records, DEFAULT_FORECAST_DAYS),
        composite_score: composite_score(
            glucose_status.status,
            blood_pressure_status.status,
            completeness,
        ),
        completeness,
        glucose_status,
        blood_pressure_status,
        rejected_readings: readings.rejected.len(),
    }
}
