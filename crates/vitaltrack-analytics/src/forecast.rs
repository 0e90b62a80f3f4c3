// ABOUTME: Short-term glucose forecast from a least-squares trend line
// ABOUTME: Projects daily points past the latest reading, clamped to a plausible band
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;
use vitaltrack_core::models::HealthRecord;

use crate::regression::{linear_regression, RegressionResult};
use crate::round_tenth;
use crate::thresholds::{FORECAST_CEILING, FORECAST_FLOOR, FORECAST_MIN_RECORDS};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// A projected glucose value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// Projected day
    pub date: NaiveDate,
    /// Projected glucose in mmol/L, one decimal
    pub predicted_value: f64,
}

fn days_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / SECONDS_PER_DAY
}

/// Project glucose `days` days past the latest glucose-bearing record
///
/// Needs at least three glucose-bearing records; fewer yields an empty
/// forecast. Observations are placed on a day axis starting at the earliest
/// reading. When every reading shares one instant the trend is flat at their
/// mean.
#[must_use]
pub fn forecast(records: &[HealthRecord], days: u32) -> Vec<ForecastPoint> {
    let mut observations: Vec<(NaiveDateTime, NaiveDate, f64)> = records
        .iter()
        .filter_map(|r| r.glucose_value().map(|g| (r.measured_at(), r.date, g)))
        .collect();

    if observations.len() < FORECAST_MIN_RECORDS {
        return Vec::new();
    }
    observations.sort_by_key(|(at, _, _)| *at);

    let (origin, _, _) = observations[0];
    let (latest_at, latest_date, _) = observations[observations.len() - 1];

    let points: Vec<(f64, f64)> = observations
        .iter()
        .map(|(at, _, glucose)| (days_between(origin, *at), *glucose))
        .collect();

    let fit = linear_regression(&points).unwrap_or_else(|e| {
        debug!(error = %e, "Degenerate glucose trend, projecting the mean");
        RegressionResult::flat(points.iter().map(|(_, y)| y).sum::<f64>() / points.len() as f64)
    });

    (1..=days)
        .filter_map(|step| {
            let offset = Days::new(u64::from(step));
            let date = latest_date.checked_add_days(offset)?;
            let at = latest_at.checked_add_days(offset)?;
            let value = fit
                .predict(days_between(origin, at))
                .clamp(FORECAST_FLOOR, FORECAST_CEILING);
            Some(ForecastPoint {
                date,
                predicted_value: round_tenth(value),
            })
        })
        .collect()
}
