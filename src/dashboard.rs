// ABOUTME: Caller contract for the moderation dashboard
// ABOUTME: Wires record store, view cache, search engine, and workflow; broadcasts decision notices
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Moderation Dashboard
//!
//! Everything a presentation layer needs: read-through station lists,
//! search, local filtering, and decisions that report a user-facing notice.

use crate::cache::memory::InMemoryCache;
use crate::cache::{CacheConfig, CacheProvider, CacheSync, SyncError, ViewKey, ViewSynchronizer};
use crate::config::ModerationConfig;
use crate::database_plugins::StationStore;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{ModerationOutcome, StationId, StationRecord, StationStatus};
use crate::moderation::{DecisionReport, ModerationWorkflow, Notice};
use crate::permissions::PrivilegeCheck;
use crate::search::{filter_records, LiveSearch, SearchEngine};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Capacity of the notice channel; slow subscribers miss older notices
const NOTICE_CHANNEL_CAPACITY: usize = 64;

/// Moderation dashboard services
pub struct ModerationDashboard {
    views: Arc<CacheSync<InMemoryCache>>,
    workflow: ModerationWorkflow,
    search: SearchEngine,
    notices: broadcast::Sender<Notice>,
}

impl ModerationDashboard {
    /// Build the dashboard over `store`
    ///
    /// # Errors
    ///
    /// Returns an error if the view cache cannot be created
    pub async fn new(store: Arc<dyn StationStore>, config: &ModerationConfig) -> AppResult<Self> {
        let cache_config = CacheConfig::from(&config.cache);
        let view_ttl = cache_config.view_ttl;
        let cache = InMemoryCache::new(cache_config).await?;
        Ok(Self::with_cache(store, cache, view_ttl, config))
    }

    /// Build the dashboard over an existing view cache
    #[must_use]
    pub fn with_cache(
        store: Arc<dyn StationStore>,
        cache: InMemoryCache,
        view_ttl: std::time::Duration,
        config: &ModerationConfig,
    ) -> Self {
        let views = Arc::new(CacheSync::new(Arc::clone(&store), cache, view_ttl));
        let synchronizer: Arc<dyn ViewSynchronizer> = views.clone();
        Self::assemble(store, views, synchronizer, config)
    }

    /// Build the dashboard with a custom synchronization barrier
    ///
    /// Reads still go through `views`; decisions call `synchronizer`.
    #[must_use]
    pub fn assemble(
        store: Arc<dyn StationStore>,
        views: Arc<CacheSync<InMemoryCache>>,
        synchronizer: Arc<dyn ViewSynchronizer>,
        config: &ModerationConfig,
    ) -> Self {
        let (notices, _) = broadcast::channel(NOTICE_CHANNEL_CAPACITY);
        Self {
            workflow: ModerationWorkflow::new(Arc::clone(&store), synchronizer),
            search: SearchEngine::new(store, &config.search),
            views,
            notices,
        }
    }

    /// Stations awaiting review, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the store or the view cache fails
    pub async fn list_pending(&self) -> AppResult<Vec<StationRecord>> {
        self.view(&ViewKey::PendingList).await
    }

    /// Verified stations, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the store or the view cache fails
    pub async fn list_verified(&self) -> AppResult<Vec<StationRecord>> {
        self.view(&ViewKey::VerifiedList).await
    }

    /// Reported stations, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the store or the view cache fails
    pub async fn list_reported(&self) -> AppResult<Vec<StationRecord>> {
        self.view(&ViewKey::ReportedList).await
    }

    /// Register an external view listing `status`, such as the map display
    ///
    /// The view is refreshed by every later decision.
    pub fn register_view(&self, name: impl Into<String>, status: StationStatus) -> ViewKey {
        let key = ViewKey::external(name);
        self.views.register_view(key.clone(), status);
        key
    }

    /// Read any registered view
    ///
    /// # Errors
    ///
    /// Returns an error if the view is unknown or the store or cache fails
    pub async fn view(&self, key: &ViewKey) -> AppResult<Vec<StationRecord>> {
        self.views.view(key).await.map_err(view_error)
    }

    /// Immediate name search; blank queries and failures yield nothing
    pub async fn search(&self, query: &str) -> Vec<StationRecord> {
        self.search.search_now(query).await
    }

    /// Debounced live search handle
    #[must_use]
    pub const fn live_search(&self) -> &LiveSearch {
        self.search.live()
    }

    /// Filter an already fetched working set
    #[must_use]
    pub fn filter(working_set: &[StationRecord], query: &str) -> Vec<StationRecord> {
        filter_records(working_set, query)
    }

    /// Approve or reject a station and report the outcome
    ///
    /// The notice is also broadcast to every notice subscriber.
    pub async fn decide(
        &self,
        caller: &dyn PrivilegeCheck,
        id: StationId,
        outcome: ModerationOutcome,
    ) -> DecisionReport {
        let result = self.workflow.transition(caller, id, outcome).await;
        let report = DecisionReport::new(id, outcome, result);
        info!(
            station_id = %id,
            %outcome,
            level = %report.notice.level,
            "Moderation decision settled"
        );
        if self.notices.send(report.notice.clone()).is_err() {
            debug!("No notice subscribers");
        }
        report
    }

    /// Receive the notice of every later decision
    #[must_use]
    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    /// The moderation workflow, for inspection
    #[must_use]
    pub const fn workflow(&self) -> &ModerationWorkflow {
        &self.workflow
    }
}

fn view_error(error: SyncError) -> AppError {
    let code = match &error {
        SyncError::UnknownView { .. } => ErrorCode::ResourceNotFound,
        SyncError::Refetch { .. } => ErrorCode::ResourceUnavailable,
        SyncError::Invalidation(_) | SyncError::Cache(_) => ErrorCode::StorageError,
    };
    AppError::new(code, error.to_string()).with_source(error)
}
