// ABOUTME: Post-decision synchronization barrier over every registered station view
// ABOUTME: Invalidates, re-fetches, and locates the decided record before reporting completion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # View Synchronization
//!
//! Station lists are read through the view cache. After a moderation decision
//! every registered view is invalidated and then re-fetched from the record
//! store; the caller is only told the decision completed once the fresh
//! lists are in place.
//!
//! A read-through that started before a synchronization must not write its
//! (possibly pre-decision) result back over the fresh lists. Each
//! synchronization bumps an epoch under an exclusive barrier, and
//! read-throughs only populate the cache when the epoch they observed before
//! fetching is still current.

use super::memory::InMemoryCache;
use super::{CacheProvider, ViewKey};
use crate::database_plugins::StationStore;
use crate::errors::{AppError, StoreError};
use crate::models::{StationId, StationRecord, StationStatus};
use async_trait::async_trait;
use dashmap::DashMap;
use futures_util::future::try_join_all;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Failure while bringing views back in line with the record store
#[derive(Debug, Error)]
pub enum SyncError {
    /// Dropping the cached views failed
    #[error("failed to invalidate station views: {0}")]
    Invalidation(#[source] AppError),

    /// Re-reading one view from the store failed
    #[error("failed to re-fetch view '{view}': {source}")]
    Refetch {
        /// View being refreshed
        view: String,
        /// Store failure
        #[source]
        source: StoreError,
    },

    /// Writing a fresh view into the cache failed
    #[error("failed to repopulate station views: {0}")]
    Cache(#[source] AppError),

    /// The view was never registered
    #[error("unknown station view '{view}'")]
    UnknownView {
        /// Requested view
        view: String,
    },
}

/// Outcome of one synchronization pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Record the pass was run for
    pub station_id: StationId,
    /// Cache entries dropped
    pub invalidated: u64,
    /// Views re-fetched and repopulated
    pub refetched: usize,
    /// Views whose fresh contents include the record, with their status
    pub located_in: Vec<(ViewKey, StationStatus)>,
}

/// Barrier run by the moderation workflow after a successful write
#[async_trait]
pub trait ViewSynchronizer: Send + Sync {
    /// Invalidate every dependent view, then re-fetch each one
    ///
    /// Returns only after every re-fetch has completed.
    async fn synchronize(&self, id: StationId) -> Result<SyncReport, SyncError>;
}

/// Read-through view cache plus the synchronization barrier
pub struct CacheSync<C: CacheProvider = InMemoryCache> {
    store: Arc<dyn StationStore>,
    cache: C,
    views: DashMap<ViewKey, StationStatus>,
    epoch: AtomicU64,
    barrier: RwLock<()>,
    ttl: Duration,
}

impl<C: CacheProvider> CacheSync<C> {
    /// Create the layer with the built-in pending, verified and reported views
    #[must_use]
    pub fn new(store: Arc<dyn StationStore>, cache: C, ttl: Duration) -> Self {
        let views = DashMap::new();
        for (key, status) in ViewKey::builtin() {
            views.insert(key, status);
        }
        Self {
            store,
            cache,
            views,
            epoch: AtomicU64::new(0),
            barrier: RwLock::new(()),
            ttl,
        }
    }

    /// Register a view listing one status; it joins every later synchronization
    ///
    /// Returns the status the key listed before, if it was already registered.
    pub fn register_view(&self, key: ViewKey, status: StationStatus) -> Option<StationStatus> {
        info!(view = %key, %status, "Registered station view");
        self.views.insert(key, status)
    }

    /// Registered views with the status each lists
    #[must_use]
    pub fn registered_views(&self) -> Vec<(ViewKey, StationStatus)> {
        self.views
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    /// The underlying cache
    #[must_use]
    pub const fn cache(&self) -> &C {
        &self.cache
    }

    /// Read a view, fetching and caching it on a miss
    ///
    /// # Errors
    ///
    /// Returns an error if the view is unknown or the store or cache fails
    pub async fn view(&self, key: &ViewKey) -> Result<Vec<StationRecord>, SyncError> {
        let status = self
            .views
            .get(key)
            .map(|entry| *entry.value())
            .ok_or_else(|| SyncError::UnknownView {
                view: key.to_string(),
            })?;

        if let Some(records) = self.cache.get(key).await.map_err(SyncError::Cache)? {
            return Ok(records);
        }

        let observed = self.epoch.load(Ordering::Acquire);
        let records = self
            .store
            .fetch_by_status(status)
            .await
            .map_err(|source| SyncError::Refetch {
                view: key.to_string(),
                source,
            })?;

        let _reader = self.barrier.read().await;
        if self.epoch.load(Ordering::Acquire) == observed {
            self.cache
                .set(key, &records, self.ttl)
                .await
                .map_err(SyncError::Cache)?;
        } else {
            debug!(view = %key, "Skipped caching a view read that overlapped a synchronization");
        }
        Ok(records)
    }

    async fn refetch(
        &self,
        key: ViewKey,
        status: StationStatus,
    ) -> Result<(ViewKey, StationStatus, Vec<StationRecord>), SyncError> {
        let records = self
            .store
            .fetch_by_status(status)
            .await
            .map_err(|source| SyncError::Refetch {
                view: key.to_string(),
                source,
            })?;
        self.cache
            .set(&key, &records, self.ttl)
            .await
            .map_err(SyncError::Cache)?;
        Ok((key, status, records))
    }
}

#[async_trait]
impl<C: CacheProvider + 'static> ViewSynchronizer for CacheSync<C> {
    async fn synchronize(&self, id: StationId) -> Result<SyncReport, SyncError> {
        let _exclusive = self.barrier.write().await;
        self.epoch.fetch_add(1, Ordering::AcqRel);

        let invalidated = self
            .cache
            .invalidate_pattern(&ViewKey::all_pattern())
            .await
            .map_err(SyncError::Invalidation)?;

        let views = self.registered_views();
        let refetches = views
            .into_iter()
            .map(|(key, status)| self.refetch(key, status));
        let refreshed = match try_join_all(refetches).await {
            Ok(refreshed) => refreshed,
            Err(e) => {
                // Leave no half-refreshed views behind
                if let Err(clear) = self.cache.invalidate_pattern(&ViewKey::all_pattern()).await {
                    warn!(error = %clear, "Failed to drop views after an aborted synchronization");
                }
                return Err(e);
            }
        };

        let located_in = refreshed
            .iter()
            .filter(|(_, _, records)| records.iter().any(|record| record.id == id))
            .map(|(key, status, _)| (key.clone(), *status))
            .collect();

        let report = SyncReport {
            station_id: id,
            invalidated,
            refetched: refreshed.len(),
            located_in,
        };
        debug!(
            station_id = %id,
            invalidated = report.invalidated,
            refetched = report.refetched,
            "Station views synchronized"
        );
        Ok(report)
    }
}
