// ABOUTME: Ordinary least-squares regression over (x, y) observations
// ABOUTME: Reports the fitted slope and intercept used for trend projection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

use serde::{Deserialize, Serialize};
use vitaltrack_core::{AppError, AppResult};

/// Fitted line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Change in y per unit x
    pub slope: f64,
    /// Value of y at x = 0
    pub intercept: f64,
}

impl RegressionResult {
    /// Line with zero slope through `y`
    #[must_use]
    pub const fn flat(y: f64) -> Self {
        Self {
            slope: 0.0,
            intercept: y,
        }
    }

    /// Value of the fitted line at `x`
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }
}

/// Fit `y = slope * x + intercept` by least squares
///
/// # Errors
///
/// Returns a validation error with fewer than two points or when every `x`
/// is identical (the slope is undefined).
pub fn linear_regression(points: &[(f64, f64)]) -> AppResult<RegressionResult> {
    if points.len() < 2 {
        return Err(AppError::invalid_input(format!(
            "Insufficient data points for regression: need at least 2, got {}",
            points.len()
        )));
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;
    let sum_xx = points.iter().map(|(x, _)| x * x).sum::<f64>();
    let sum_xy = points.iter().map(|(x, y)| x * y).sum::<f64>();

    let denominator = (n * mean_x).mul_add(-mean_x, sum_xx);
    if denominator.abs() < f64::EPSILON {
        return Err(AppError::invalid_input(
            "Cannot calculate regression: zero variance in x",
        ));
    }

    let slope = (n * mean_x).mul_add(-mean_y, sum_xy) / denominator;
    Ok(RegressionResult {
        slope,
        intercept: slope.mul_add(-mean_x, mean_y),
    })
}
