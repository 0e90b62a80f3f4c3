// ABOUTME: Client context wiring session, transport, cache, and services together
// ABOUTME: Explicit dependency injection in place of process-wide singletons
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

//! Composed client context
//!
//! Build one [`ClientContext`] per signed-in user and pass it (or the handles
//! it exposes) to whatever needs them. Signing out through the session
//! invalidates the record cache automatically.

use std::sync::Arc;

use tracing::debug;
use vitaltrack_core::AppResult;

use crate::api::HealthApi;
use crate::cache::RecordCache;
use crate::config::ClientConfig;
use crate::services::HealthRecordsService;
use crate::session::Session;
use crate::transport::{Sleeper, Transport};

/// Every long-lived handle the client needs
#[derive(Clone)]
pub struct ClientContext {
    session: Arc<Session>,
    api: Arc<HealthApi>,
    cache: Arc<RecordCache>,
    records: Arc<HealthRecordsService>,
}

impl ClientContext {
    /// Wire a context from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built
    pub fn from_config(config: ClientConfig) -> AppResult<Self> {
        let session = Arc::new(Session::with_token(config.token.clone()));
        let transport = Transport::new(config, session)?;
        Ok(Self::from_transport(transport))
    }

    /// Wire a context around a transport using a custom backoff sleeper
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built
    pub fn with_sleeper(config: ClientConfig, sleeper: Arc<dyn Sleeper>) -> AppResult<Self> {
        let session = Arc::new(Session::with_token(config.token.clone()));
        let transport = Transport::new(config, session)?.with_sleeper(sleeper);
        Ok(Self::from_transport(transport))
    }

    fn from_transport(transport: Transport) -> Self {
        let ttl = transport.config().cache_ttl;
        let period = transport.config().default_period;
        let session = transport.session().clone();
        let api = Arc::new(HealthApi::new(Arc::new(transport)));
        let cache = Arc::new(RecordCache::new(api.clone(), ttl, period));
        session.subscribe(&cache);
        let records = Arc::new(HealthRecordsService::new(api.clone(), cache.clone()));
        debug!(%period, ttl_secs = ttl.as_secs(), "Client context ready");

        Self {
            session,
            api,
            cache,
            records,
        }
    }

    /// Session facade
    #[must_use]
    pub const fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Endpoint bindings
    #[must_use]
    pub const fn api(&self) -> &Arc<HealthApi> {
        &self.api
    }

    /// Record cache
    #[must_use]
    pub const fn cache(&self) -> &Arc<RecordCache> {
        &self.cache
    }

    /// Record service
    #[must_use]
    pub const fn records(&self) -> &Arc<HealthRecordsService> {
        &self.records
    }
}
