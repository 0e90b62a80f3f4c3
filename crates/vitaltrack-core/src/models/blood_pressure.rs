// ABOUTME: Blood pressure reading parsed from the "systolic/diastolic" wire form
// ABOUTME: Strict parsing so malformed readings are excluded rather than guessed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// A single blood pressure reading in mmHg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressure {
    /// Systolic pressure
    pub systolic: u32,
    /// Diastolic pressure
    pub diastolic: u32,
}

impl BloodPressure {
    /// Parse a `"S/D"` string
    ///
    /// Exactly two `/`-separated parts are required; each part is trimmed and
    /// must be a plain non-negative integer.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the reading has the wrong shape or a
    /// non-numeric part.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let parts: Vec<&str> = raw.split('/').collect();
        let [systolic, diastolic] = parts.as_slice() else {
            return Err(AppError::invalid_input(format!(
                "blood pressure must be systolic/diastolic, got {raw:?}"
            )));
        };

        Ok(Self {
            systolic: parse_part(systolic, raw)?,
            diastolic: parse_part(diastolic, raw)?,
        })
    }
}

fn parse_part(part: &str, raw: &str) -> AppResult<u32> {
    part.trim().parse::<u32>().map_err(|e| {
        AppError::invalid_input(format!("non-numeric blood pressure part in {raw:?}")).with_source(e)
    })
}

impl FromStr for BloodPressure {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_parts() {
        let bp = BloodPressure::parse(" 120 / 80 ").unwrap();
        assert_eq!(bp, BloodPressure { systolic: 120, diastolic: 80 });
        assert_eq!(bp.to_string(), "120/80");
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        assert!(BloodPressure::parse("120").is_err());
        assert!(BloodPressure::parse("120/80/60").is_err());
        assert!(BloodPressure::parse("abc/80").is_err());
        assert!(BloodPressure::parse("120/").is_err());
        assert!(BloodPressure::parse("120.5/80").is_err());
    }
}
