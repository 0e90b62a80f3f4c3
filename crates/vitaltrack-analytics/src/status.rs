// ABOUTME: Status classification for glucose and blood-pressure readings
// ABOUTME: Maps values onto status bands with a risk level and readable description
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

use serde::{Deserialize, Serialize};
use vitaltrack_core::models::BloodPressure;

use crate::thresholds::{
    DIASTOLIC_BORDERLINE_MAX, DIASTOLIC_LOW_BELOW, DIASTOLIC_NORMAL_MAX, GLUCOSE_BORDERLINE_MAX,
    GLUCOSE_HIGH_MAX, GLUCOSE_LOW_BELOW, GLUCOSE_NORMAL_MAX, SYSTOLIC_BORDERLINE_MAX,
    SYSTOLIC_LOW_BELOW, SYSTOLIC_NORMAL_MAX,
};

/// Status band of a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Within the ideal range
    Normal,
    /// Slightly outside the ideal range
    Borderline,
    /// Above the normal range
    High,
    /// Below the normal range
    Low,
    /// Markedly above range; glucose only
    Danger,
    /// No usable reading
    Unknown,
}

impl HealthStatus {
    /// Wire name of the status
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Borderline => "borderline",
            Self::High => "high",
            Self::Low => "low",
            Self::Danger => "danger",
            Self::Unknown => "unknown",
        }
    }
}

/// Clinical risk attached to a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Routine monitoring
    Low,
    /// Lifestyle attention advised
    Medium,
    /// Medical consultation advised
    High,
}

/// Result of evaluating a reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusAssessment {
    /// Status band
    pub status: HealthStatus,
    /// Risk level; absent for unknown status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskLevel>,
    /// Human-readable explanation
    pub description: String,
}

impl StatusAssessment {
    fn new(status: HealthStatus, risk: RiskLevel, description: &str) -> Self {
        Self {
            status,
            risk: Some(risk),
            description: description.to_owned(),
        }
    }

    fn unknown(description: &str) -> Self {
        Self {
            status: HealthStatus::Unknown,
            risk: None,
            description: description.to_owned(),
        }
    }
}

/// Classify a glucose value in mmol/L
///
/// Bands: `< 3.9` low, `3.9..=6.1` normal, `(6.1, 7.0]` borderline,
/// `(7.0, 10.0]` high, above `10.0` danger. Missing or non-finite input is
/// unknown.
#[must_use]
pub fn evaluate_glucose(value: Option<f64>) -> StatusAssessment {
    let Some(glucose) = value.filter(|v| v.is_finite()) else {
        return StatusAssessment::unknown("insufficient data");
    };

    if glucose < GLUCOSE_LOW_BELOW {
        StatusAssessment::new(
            HealthStatus::Low,
            RiskLevel::Medium,
            "glucose is low, take in some energy",
        )
    } else if glucose <= GLUCOSE_NORMAL_MAX {
        StatusAssessment::new(
            HealthStatus::Normal,
            RiskLevel::Low,
            "glucose is in the ideal range",
        )
    } else if glucose <= GLUCOSE_BORDERLINE_MAX {
        StatusAssessment::new(
            HealthStatus::Borderline,
            RiskLevel::Low,
            "glucose is slightly elevated, watch your diet",
        )
    } else if glucose <= GLUCOSE_HIGH_MAX {
        StatusAssessment::new(
            HealthStatus::High,
            RiskLevel::Medium,
            "glucose is above the normal range, control diet and exercise more",
        )
    } else {
        StatusAssessment::new(
            HealthStatus::Danger,
            RiskLevel::High,
            "glucose is markedly elevated, consult a doctor",
        )
    }
}

/// Classify a `"systolic/diastolic"` reading
///
/// Low wins when either side is under its floor; otherwise both sides must be
/// within a band for the reading to qualify for it.
#[must_use]
pub fn evaluate_blood_pressure(value: Option<&str>) -> StatusAssessment {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return StatusAssessment::unknown("insufficient data");
    };
    let Ok(bp) = BloodPressure::parse(raw) else {
        return StatusAssessment::unknown("invalid reading format");
    };
    classify_blood_pressure(bp)
}

/// Classify an already parsed reading
#[must_use]
pub fn classify_blood_pressure(bp: BloodPressure) -> StatusAssessment {
    let BloodPressure { systolic, diastolic } = bp;

    if systolic < SYSTOLIC_LOW_BELOW || diastolic < DIASTOLIC_LOW_BELOW {
        StatusAssessment::new(HealthStatus::Low, RiskLevel::Medium, "blood pressure is low")
    } else if systolic <= SYSTOLIC_NORMAL_MAX && diastolic <= DIASTOLIC_NORMAL_MAX {
        StatusAssessment::new(
            HealthStatus::Normal,
            RiskLevel::Low,
            "blood pressure is in the ideal range",
        )
    } else if systolic <= SYSTOLIC_BORDERLINE_MAX && diastolic <= DIASTOLIC_BORDERLINE_MAX {
        StatusAssessment::new(
            HealthStatus::Borderline,
            RiskLevel::Low,
            "blood pressure is slightly elevated",
        )
    } else {
        StatusAssessment::new(
            HealthStatus::High,
            RiskLevel::Medium,
            "blood pressure is above the normal range, consult a doctor",
        )
    }
}
