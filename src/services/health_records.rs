// ABOUTME: Health record service with cached reads, remote writes, and derived metrics
// ABOUTME: Local cache mutations after writes are hints; a forced fetch is the resync point
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

use std::sync::Arc;

use chrono::Local;
use tracing::{info, warn};
use vitaltrack_analytics::{
    self as analytics, DerivedMetrics, ForecastPoint, HealthStatus, StatusAssessment,
};
use vitaltrack_analytics::thresholds::DEFAULT_FORECAST_DAYS;
use vitaltrack_core::models::{
    BloodPressure, HealthRecord, NewRecord, Period, RecordId, RecordPatch,
};
use vitaltrack_core::{AppError, AppResult};

use crate::api::HealthApi;
use crate::cache::RecordCache;

/// Record operations and metric getters for one signed-in user
///
/// After a successful write the cached collection is patched locally so the
/// caller sees the change immediately. The server remains the source of
/// truth: `fetch_records(true)` replaces the local view wholesale.
pub struct HealthRecordsService {
    api: Arc<HealthApi>,
    cache: Arc<RecordCache>,
}

impl HealthRecordsService {
    /// Combine endpoint bindings with the record cache
    #[must_use]
    pub const fn new(api: Arc<HealthApi>, cache: Arc<RecordCache>) -> Self {
        Self { api, cache }
    }

    /// Underlying cache
    #[must_use]
    pub const fn cache(&self) -> &Arc<RecordCache> {
        &self.cache
    }

    /// Records for the current period, from cache unless stale or forced
    ///
    /// # Errors
    ///
    /// Propagates transport errors from a fetch
    pub async fn fetch_records(&self, force_refresh: bool) -> AppResult<Vec<HealthRecord>> {
        self.cache
            .refresh(self.cache.current_period(), force_refresh)
            .await
    }

    /// Switch the reporting period, fetching when it changes
    ///
    /// # Errors
    ///
    /// Propagates transport errors from the fetch
    pub async fn set_period(&self, period: Period) -> AppResult<Vec<HealthRecord>> {
        self.cache.set_period(period).await
    }

    /// Create a record remotely and insert it at the front of the local view
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed blood pressure, otherwise
    /// propagates transport errors
    pub async fn add_record(&self, record: NewRecord) -> AppResult<HealthRecord> {
        validate_blood_pressure(record.blood_pressure.as_deref())?;
        let id = self.api.create_record(&record).await?;
        let created = record.into_record(id, Local::now().date_naive());
        info!(record_id = %created.id, "Health record created");
        self.cache.add(created.clone());
        Ok(created)
    }

    /// Update a record remotely and merge the patch into the local view
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty patch or malformed blood
    /// pressure, otherwise propagates transport errors
    pub async fn update_record(&self, id: &RecordId, patch: &RecordPatch) -> AppResult<()> {
        if patch.is_empty() {
            return Err(AppError::invalid_input("update contains no changes")
                .with_resource_id(id.as_str()));
        }
        validate_blood_pressure(patch.blood_pressure.as_deref())?;
        self.api.update_record(id, patch).await?;
        if !self.cache.update_by_id(id, patch) {
            warn!(record_id = %id, "Updated record is not in the local view");
        }
        Ok(())
    }

    /// Delete a record remotely and drop it from the local view
    ///
    /// # Errors
    ///
    /// Propagates transport errors
    pub async fn delete_record(&self, id: &RecordId) -> AppResult<()> {
        self.api.delete_record(id).await?;
        if !self.cache.remove_by_id(id) {
            warn!(record_id = %id, "Deleted record was not in the local view");
        }
        Ok(())
    }

    /// Forget the cached collection
    pub fn clear_cache(&self) {
        self.cache.invalidate();
    }

    /// Current local view
    #[must_use]
    pub fn records(&self) -> Vec<HealthRecord> {
        self.cache.snapshot()
    }

    /// Mean glucose of the local view
    #[must_use]
    pub fn glucose_average(&self) -> Option<f64> {
        analytics::average_glucose(&self.records())
    }

    /// Mean weight of the local view
    #[must_use]
    pub fn weight_average(&self) -> Option<f64> {
        analytics::average_weight(&self.records())
    }

    /// Mean blood pressure of the local view as `"S/D"`
    #[must_use]
    pub fn blood_pressure_average(&self) -> Option<String> {
        analytics::average_blood_pressure(&self.records()).map(|bp| bp.to_string())
    }

    /// Glucose status of the local view's average
    #[must_use]
    pub fn glucose_status(&self) -> StatusAssessment {
        analytics::evaluate_glucose(self.glucose_average())
    }

    /// Blood pressure status of the local view's average
    #[must_use]
    pub fn blood_pressure_status(&self) -> StatusAssessment {
        analytics::evaluate_blood_pressure(self.blood_pressure_average().as_deref())
    }

    /// Field coverage of the local view, 0-100
    #[must_use]
    pub fn completeness(&self) -> u8 {
        analytics::completeness(&self.records())
    }

    /// Advice for the local view
    #[must_use]
    pub fn advice(&self) -> Vec<String> {
        let records = self.records();
        let (glucose, blood_pressure) = statuses(&records);
        analytics::generate_advice(glucose, blood_pressure, records.len())
    }

    /// Seven-day glucose forecast for the local view
    #[must_use]
    pub fn forecast(&self) -> Vec<ForecastPoint> {
        analytics::forecast(&self.records(), DEFAULT_FORECAST_DAYS)
    }

    /// Composite score for the local view
    #[must_use]
    pub fn composite_score(&self) -> u8 {
        let records = self.records();
        let (glucose, blood_pressure) = statuses(&records);
        analytics::composite_score(glucose, blood_pressure, analytics::completeness(&records))
    }

    /// Every derived metric for the local view in one pass
    #[must_use]
    pub fn metrics(&self) -> DerivedMetrics {
        analytics::derive_metrics(&self.records())
    }
}

fn statuses(records: &[HealthRecord]) -> (HealthStatus, HealthStatus) {
    let glucose = analytics::evaluate_glucose(analytics::average_glucose(records)).status;
    let blood_pressure = analytics::average_blood_pressure(records)
        .map_or(HealthStatus::Unknown, |bp| {
            analytics::classify_blood_pressure(bp).status
        });
    (glucose, blood_pressure)
}

fn validate_blood_pressure(raw: Option<&str>) -> AppResult<()> {
    match raw.map(str::trim).filter(|bp| !bp.is_empty()) {
        Some(bp) => BloodPressure::parse(bp).map(|_| ()),
        None => Ok(()),
    }
}
