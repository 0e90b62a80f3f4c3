// ABOUTME: Record cache keyed by reporting period with TTL freshness
// ABOUTME: Atomic swap on refresh, local mutation helpers, and same-period fetch collapsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use vitaltrack_core::models::{HealthRecord, Period, RecordId, RecordPatch};
use vitaltrack_core::AppResult;

use super::RecordSource;
use crate::session::SessionListener;

/// Cached collection with the period it was fetched for
#[derive(Debug, Clone)]
struct CacheEntry {
    records: Vec<HealthRecord>,
    fetched_at: Instant,
    period: Period,
}

impl CacheEntry {
    fn is_fresh_for(&self, period: Period, ttl: Duration) -> bool {
        self.period == period && self.fetched_at.elapsed() < ttl
    }
}

#[derive(Debug)]
struct CacheState {
    entry: Option<CacheEntry>,
    period: Period,
    /// Bumped by every successful install
    installs: u64,
    /// Bumped by every invalidation; fetches started before it are not installed
    epoch: u64,
}

/// Period-scoped record cache
///
/// State lives behind a synchronous lock that is never held across an await.
/// Refreshes for the same period queue on a per-period flight guard: a caller
/// that waited behind a completed fetch reuses its result instead of issuing
/// another request.
pub struct RecordCache {
    source: Arc<dyn RecordSource>,
    ttl: Duration,
    state: RwLock<CacheState>,
    in_flight: DashMap<Period, Arc<Mutex<()>>>,
}

impl RecordCache {
    /// Empty cache reading from `source`
    pub fn new(source: Arc<dyn RecordSource>, ttl: Duration, period: Period) -> Self {
        Self {
            source,
            ttl,
            state: RwLock::new(CacheState {
                entry: None,
                period,
                installs: 0,
                epoch: 0,
            }),
            in_flight: DashMap::new(),
        }
    }

    /// Freshness window
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Currently selected period
    #[must_use]
    pub fn current_period(&self) -> Period {
        self.read_state().period
    }

    /// Collection for `period` if it is cached and fresh
    #[must_use]
    pub fn get(&self, period: Period) -> Option<Vec<HealthRecord>> {
        self.read_state()
            .entry
            .as_ref()
            .filter(|entry| entry.is_fresh_for(period, self.ttl))
            .map(|entry| entry.records.clone())
    }

    /// Last installed collection, fresh or stale; empty before the first fetch
    #[must_use]
    pub fn snapshot(&self) -> Vec<HealthRecord> {
        self.read_state()
            .entry
            .as_ref()
            .map(|entry| entry.records.clone())
            .unwrap_or_default()
    }

    /// True when a collection has been installed and not invalidated
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.read_state().entry.is_some()
    }

    /// Serve `period` from cache or fetch it
    ///
    /// With `force_refresh` the cache is bypassed. A failed fetch leaves the
    /// previous entry untouched.
    ///
    /// # Errors
    ///
    /// Propagates the source's error
    pub async fn refresh(&self, period: Period, force_refresh: bool) -> AppResult<Vec<HealthRecord>> {
        if !force_refresh {
            if let Some(records) = self.get(period) {
                debug!(%period, count = records.len(), "Record cache hit");
                return Ok(records);
            }
        }

        let (installs_before, epoch) = {
            let state = self.read_state();
            (state.installs, state.epoch)
        };
        let flight = self
            .in_flight
            .entry(period)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = flight.lock().await;

        if let Some(records) = self.completed_while_waiting(period, installs_before) {
            debug!(%period, "Reusing records fetched by a concurrent refresh");
            return Ok(records);
        }

        debug!(%period, force_refresh, "Record cache miss, fetching");
        let records = self.source.fetch_records(period).await?;
        self.install(period, epoch, records.clone());
        Ok(records)
    }

    /// Select a period; a change always fetches fresh data
    ///
    /// # Errors
    ///
    /// Propagates the source's error; the new period stays selected
    pub async fn set_period(&self, period: Period) -> AppResult<Vec<HealthRecord>> {
        let changed = {
            let mut state = self.write_state();
            let changed = state.period != period;
            state.period = period;
            changed
        };
        if changed {
            info!(%period, "Reporting period changed");
        }
        self.refresh(period, changed).await
    }

    /// Drop the cached collection; no remote effect
    pub fn invalidate(&self) {
        let mut state = self.write_state();
        state.entry = None;
        state.epoch += 1;
        debug!("Record cache invalidated");
    }

    /// Insert a record at the front of the cached collection
    pub fn add(&self, record: HealthRecord) {
        if let Some(entry) = self.write_state().entry.as_mut() {
            entry.records.retain(|r| r.id != record.id);
            entry.records.insert(0, record);
        }
    }

    /// Merge `patch` into the cached record with `id`; false when absent
    pub fn update_by_id(&self, id: &RecordId, patch: &RecordPatch) -> bool {
        let mut state = self.write_state();
        let Some(record) = state
            .entry
            .as_mut()
            .and_then(|entry| entry.records.iter_mut().find(|r| &r.id == id))
        else {
            return false;
        };
        patch.apply(record);
        true
    }

    /// Remove the cached record with `id`; false when absent
    pub fn remove_by_id(&self, id: &RecordId) -> bool {
        let mut state = self.write_state();
        let Some(entry) = state.entry.as_mut() else {
            return false;
        };
        let before = entry.records.len();
        entry.records.retain(|r| &r.id != id);
        entry.records.len() != before
    }

    fn completed_while_waiting(&self, period: Period, installs_before: u64) -> Option<Vec<HealthRecord>> {
        let state = self.read_state();
        if state.installs == installs_before {
            return None;
        }
        state
            .entry
            .as_ref()
            .filter(|entry| entry.period == period)
            .map(|entry| entry.records.clone())
    }

    fn install(&self, period: Period, epoch: u64, records: Vec<HealthRecord>) {
        let mut state = self.write_state();
        if state.epoch != epoch {
            debug!(%period, "Cache invalidated during fetch, discarding result");
            return;
        }
        let count = records.len();
        state.entry = Some(CacheEntry {
            records,
            fetched_at: Instant::now(),
            period,
        });
        state.installs += 1;
        debug!(%period, count, "Record cache updated");
    }

    fn read_state(&self) -> RwLockReadGuard<'_, CacheState> {
        self.state.read().unwrap_or_else(|poisoned| {
            warn!("Record cache lock was poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.state.write().unwrap_or_else(|poisoned| {
            warn!("Record cache lock was poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl SessionListener for RecordCache {
    fn on_signed_out(&self) {
        self.invalidate();
    }
}
