// ABOUTME: Health record models exchanged with the remote record service
// ABOUTME: Includes identifiers, creation payloads, and partial-update patches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::blood_pressure::BloodPressure;
use super::lenient;

/// Server-assigned record identifier
///
/// The server emits numeric ids for persisted rows and string ids for some
/// fixtures; both normalize to the same textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap a textual identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Self(s)),
            Value::Number(n) => Ok(Self(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "record id must be a string or number, got {other}"
            ))),
        }
    }
}

/// One biometric measurement session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    /// Server-assigned identifier
    pub id: RecordId,
    /// Calendar day of the measurement
    #[serde(deserialize_with = "lenient::date")]
    pub date: NaiveDate,
    /// Time of day, when recorded
    #[serde(default, deserialize_with = "lenient::time", skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    /// Measurement context such as `fasting` or `after_meal`
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub measure_type: Option<String>,
    /// Blood glucose in mmol/L
    #[serde(default, deserialize_with = "lenient::number")]
    pub glucose: Option<f64>,
    /// Body weight in kg
    #[serde(default, deserialize_with = "lenient::number")]
    pub weight: Option<f64>,
    /// Blood pressure as `"systolic/diastolic"`
    #[serde(default, deserialize_with = "lenient::text")]
    pub blood_pressure: Option<String>,
    /// Free-form note
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub note: String,
}

impl HealthRecord {
    /// Instant of the measurement; midnight when no time was recorded
    #[must_use]
    pub fn measured_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time.unwrap_or(NaiveTime::MIN))
    }

    /// Glucose value when present and finite
    #[must_use]
    pub fn glucose_value(&self) -> Option<f64> {
        self.glucose.filter(|g| g.is_finite())
    }

    /// Weight value when present and finite
    #[must_use]
    pub fn weight_value(&self) -> Option<f64> {
        self.weight.filter(|w| w.is_finite())
    }

    /// Raw blood pressure text when present
    #[must_use]
    pub fn blood_pressure_text(&self) -> Option<&str> {
        self.blood_pressure
            .as_deref()
            .map(str::trim)
            .filter(|bp| !bp.is_empty())
    }

    /// Parsed blood pressure; `None` when absent or malformed
    #[must_use]
    pub fn parsed_blood_pressure(&self) -> Option<BloodPressure> {
        self.blood_pressure_text()
            .and_then(|bp| BloodPressure::parse(bp).ok())
    }
}

/// Payload for creating a record; the server assigns the id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    /// Calendar day of the measurement
    pub date: Option<NaiveDate>,
    /// Time of day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    /// Measurement context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure_type: Option<String>,
    /// Blood glucose in mmol/L
    pub glucose: Option<f64>,
    /// Body weight in kg
    pub weight: Option<f64>,
    /// Blood pressure as `"systolic/diastolic"`
    pub blood_pressure: Option<String>,
    /// Free-form note
    #[serde(default)]
    pub note: String,
}

impl NewRecord {
    /// Materialize the payload as a record under the server-assigned id
    ///
    /// A payload without a date is stamped with `today`.
    #[must_use]
    pub fn into_record(self, id: RecordId, today: NaiveDate) -> HealthRecord {
        HealthRecord {
            id,
            date: self.date.unwrap_or(today),
            time: self.time,
            measure_type: self.measure_type,
            glucose: self.glucose,
            weight: self.weight,
            blood_pressure: self.blood_pressure,
            note: self.note,
        }
    }
}

/// Partial update merged into an existing record by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    /// New calendar day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// New time of day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    /// New measurement context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure_type: Option<String>,
    /// New glucose value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glucose: Option<f64>,
    /// New weight value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// New blood pressure text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
    /// New note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RecordPatch {
    /// True when the patch would change nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Overwrite the fields this patch sets; the id is never touched
    pub fn apply(&self, record: &mut HealthRecord) {
        if let Some(date) = self.date {
            record.date = date;
        }
        if let Some(time) = self.time {
            record.time = Some(time);
        }
        if let Some(measure_type) = &self.measure_type {
            record.measure_type = Some(measure_type.clone());
        }
        if let Some(glucose) = self.glucose {
            record.glucose = Some(glucose);
        }
        if let Some(weight) = self.weight {
            record.weight = Some(weight);
        }
        if let Some(blood_pressure) = &self.blood_pressure {
            record.blood_pressure = Some(blood_pressure.clone());
        }
        if let Some(note) = &self.note {
            record.note.clone_from(note);
        }
    }
}
