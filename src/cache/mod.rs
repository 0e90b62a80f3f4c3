// ABOUTME: Time-bounded local cache of the remote record collection
// ABOUTME: Defines the record source seam and re-exports the record cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

/// Period-scoped record cache with in-flight de-duplication
pub mod records;

use async_trait::async_trait;
use vitaltrack_core::models::{HealthRecord, Period};
use vitaltrack_core::AppResult;

pub use records::RecordCache;

/// Where the cache loads record collections from
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the full collection for `period`
    async fn fetch_records(&self, period: Period) -> AppResult<Vec<HealthRecord>>;
}
