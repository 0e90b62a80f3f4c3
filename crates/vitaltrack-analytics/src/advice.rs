// ABOUTME: Rule-based lifestyle advice keyed by glucose and blood-pressure status
// ABOUTME: Ordered glucose items, then blood pressure, then generic, then a logging reminder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

use crate::status::HealthStatus;
use crate::thresholds::ADVICE_MIN_RECORDS;

const GLUCOSE_ELEVATED: &[&str] = &[
    "Limit carbohydrate intake and avoid high-sugar foods",
    "Exercise daily with at least 30 minutes of aerobic activity",
    "Monitor glucose at regular times and record the changes",
];

const GLUCOSE_LOW: &[&str] = &[
    "Eat some sugary food to prevent hypoglycemia episodes",
    "Keep regular meals and avoid long periods without eating",
    "Carry candy or glucose tablets in case of low blood sugar",
];

const BP_HIGH: &[&str] = &[
    "Reduce salt intake to no more than 5 g per day",
    "Stay calm and avoid emotional agitation",
    "Quit smoking, limit alcohol, and keep a healthy lifestyle",
];

const BP_LOW: &[&str] = &[
    "Moderately increase salt intake and avoid standing up suddenly",
    "Drink plenty of water to stay hydrated",
];

const GENERIC: &[&str] = &[
    "Keep a regular schedule and get enough sleep",
    "Eat a balanced diet with more vegetables and fruit",
];

const KEEP_LOGGING: &str = "Keep logging your health data for a more accurate analysis";

/// Build the ordered, de-duplicated advice list
///
/// `record_count` is the size of the whole collection, not only the records
/// that fed the status values.
#[must_use]
pub fn generate_advice(
    glucose_status: HealthStatus,
    bp_status: HealthStatus,
    record_count: usize,
) -> Vec<String> {
    let glucose: &[&str] = match glucose_status {
        HealthStatus::High | HealthStatus::Danger => GLUCOSE_ELEVATED,
        HealthStatus::Low => GLUCOSE_LOW,
        _ => &[],
    };
    let blood_pressure: &[&str] = match bp_status {
        HealthStatus::High => BP_HIGH,
        HealthStatus::Low => BP_LOW,
        _ => &[],
    };
    let reminder: &[&str] = if record_count < ADVICE_MIN_RECORDS {
        &[KEEP_LOGGING]
    } else {
        &[]
    };

    let mut advice: Vec<String> = Vec::new();
    for item in glucose
        .iter()
        .chain(blood_pressure)
        .chain(GENERIC)
        .chain(reminder)
    {
        if !advice.iter().any(|existing| existing == item) {
            advice.push((*item).to_owned());
        }
    }
    advice
}
