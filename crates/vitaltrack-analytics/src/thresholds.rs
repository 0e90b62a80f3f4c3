// ABOUTME: Clinical thresholds and scoring constants for the analytics engine
// ABOUTME: Glucose in mmol/L, blood pressure in mmHg, score adjustments in points
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

/// Glucose below this is low
pub const GLUCOSE_LOW_BELOW: f64 = 3.9;
/// Upper bound (inclusive) of the normal glucose band
pub const GLUCOSE_NORMAL_MAX: f64 = 6.1;
/// Upper bound (inclusive) of the borderline glucose band
pub const GLUCOSE_BORDERLINE_MAX: f64 = 7.0;
/// Upper bound (inclusive) of the high glucose band; above is danger
pub const GLUCOSE_HIGH_MAX: f64 = 10.0;

/// Systolic below this is low
pub const SYSTOLIC_LOW_BELOW: u32 = 90;
/// Diastolic below this is low
pub const DIASTOLIC_LOW_BELOW: u32 = 60;
/// Systolic normal ceiling (inclusive)
pub const SYSTOLIC_NORMAL_MAX: u32 = 120;
/// Diastolic normal ceiling (inclusive)
pub const DIASTOLIC_NORMAL_MAX: u32 = 80;
/// Systolic borderline ceiling (inclusive)
pub const SYSTOLIC_BORDERLINE_MAX: u32 = 140;
/// Diastolic borderline ceiling (inclusive)
pub const DIASTOLIC_BORDERLINE_MAX: u32 = 90;

/// Glucose-bearing records needed before a forecast is produced
pub const FORECAST_MIN_RECORDS: usize = 3;
/// Default forecast horizon in days
pub const DEFAULT_FORECAST_DAYS: u32 = 7;
/// Lowest glucose value a forecast may report
pub const FORECAST_FLOOR: f64 = 3.0;
/// Highest glucose value a forecast may report
pub const FORECAST_CEILING: f64 = 10.0;

/// Collections smaller than this get a reminder to keep logging
pub const ADVICE_MIN_RECORDS: usize = 5;

/// Composite score starting point
pub const SCORE_BASE: f64 = 80.0;
/// Composite score floor
pub const SCORE_MIN: f64 = 0.0;
/// Composite score ceiling
pub const SCORE_MAX: f64 = 100.0;
/// Completeness points per score point
pub const COMPLETENESS_DIVISOR: f64 = 10.0;
