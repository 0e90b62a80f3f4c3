// ABOUTME: Health analytics engine turning record snapshots into presentation-ready metrics
// ABOUTME: Averages, status classification, linear forecast, advice, and composite scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

#![deny(unsafe_code)]

//! # `VitalTrack` Analytics
//!
//! Deterministic functions over a slice of health records. Nothing here is
//! cached: callers pass the current snapshot and receive freshly derived
//! values, so results always reflect the latest record collection.
//!
//! Malformed inputs never abort a computation. A record with an unreadable
//! blood pressure is excluded from blood-pressure aggregates, and sparse data
//! yields empty results (`None`, empty forecast) rather than errors.

/// Advice rule list keyed by glucose and blood-pressure status
pub mod advice;
/// Arithmetic means of present field values
pub mod averages;
/// Least-squares glucose trend projection
pub mod forecast;
/// Assembly of every derived value into one snapshot
pub mod metrics;
/// Ordinary least-squares regression
pub mod regression;
/// Completeness and composite wellness score
pub mod score;
/// Status classification for glucose and blood pressure
pub mod status;
/// Clinical thresholds and scoring constants
pub mod thresholds;

pub use advice::generate_advice;
pub use averages::{
    average_blood_pressure, average_glucose, average_weight, BloodPressureReadings,
};
pub use forecast::{forecast, ForecastPoint};
pub use metrics::{derive_metrics, DerivedMetrics};
pub use regression::{linear_regression, RegressionResult};
pub use score::{completeness, composite_score};
pub use status::{
    classify_blood_pressure, evaluate_blood_pressure, evaluate_glucose, HealthStatus, RiskLevel,
    StatusAssessment,
};

/// Round to one decimal place
#[must_use]
pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
