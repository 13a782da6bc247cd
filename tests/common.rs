// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides an instrumented in-memory station store, fixtures, and dashboard setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::significant_drop_tightening
)]
//! Shared test utilities for `station_moderation`
//!
//! `FakeStationStore` counts every call and exposes knobs for delaying or
//! failing individual operations, so paused-clock tests can line up
//! concurrent decisions, searches, and view reads deterministically.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, SubsecRound, Utc};
use station_moderation::{
    config::{DatabaseUrl, ModerationConfig, SearchConfig, ViewCacheConfig},
    dashboard::ModerationDashboard,
    database_plugins::{factory::Database, StationStore, StatusUpdate},
    errors::{StoreError, StoreResult},
    models::{GeoPoint, StationId, StationRecord, StationStatus, UserProfile},
    permissions::{CallerContext, CallerRole},
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Record store limit mirrored by the fake
pub const FAKE_SEARCH_LIMIT: usize = 20;

#[derive(Default)]
struct Knobs {
    search_delays: HashMap<String, Duration>,
    update_delay: Option<Duration>,
    next_status_fetch_delay: Option<Duration>,
    fail_fetch_by_status: bool,
    fail_fetch_by_id: bool,
    fail_search: bool,
    concurrent_write: Option<StationStatus>,
    status_after_write: Option<StationStatus>,
}

#[derive(Default)]
struct Calls {
    fetch_by_status: AtomicUsize,
    fetch_by_id: AtomicUsize,
    update_status: AtomicUsize,
    search: AtomicUsize,
}

/// In-memory `StationStore` with call counters and failure injection
#[derive(Default)]
pub struct FakeStationStore {
    records: Mutex<HashMap<StationId, StationRecord>>,
    knobs: Mutex<Knobs>,
    calls: Calls,
    search_queries: Mutex<Vec<String>>,
}

impl FakeStationStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_records(records: impl IntoIterator<Item = StationRecord>) -> Arc<Self> {
        let store = Self::default();
        {
            let mut map = store.records.lock().unwrap();
            for record in records {
                map.insert(record.id, record);
            }
        }
        Arc::new(store)
    }

    pub fn insert(&self, record: StationRecord) {
        self.records.lock().unwrap().insert(record.id, record);
    }

    pub fn get(&self, id: StationId) -> Option<StationRecord> {
        self.records.lock().unwrap().get(&id).cloned()
    }

    /// Overwrite a status outside the workflow, as another client would
    pub fn set_status(&self, id: StationId, status: StationStatus) {
        if let Some(record) = self.records.lock().unwrap().get_mut(&id) {
            record.status = status;
        }
    }

    pub fn delay_search(&self, query: &str, delay: Duration) {
        self.knobs
            .lock()
            .unwrap()
            .search_delays
            .insert(query.to_owned(), delay);
    }

    pub fn delay_updates(&self, delay: Duration) {
        self.knobs.lock().unwrap().update_delay = Some(delay);
    }

    /// The next `fetch_by_status` snapshots its rows, then waits `delay` before returning
    pub fn delay_next_status_fetch(&self, delay: Duration) {
        self.knobs.lock().unwrap().next_status_fetch_delay = Some(delay);
    }

    pub fn fail_fetch_by_status(&self, fail: bool) {
        self.knobs.lock().unwrap().fail_fetch_by_status = fail;
    }

    pub fn fail_fetch_by_id(&self, fail: bool) {
        self.knobs.lock().unwrap().fail_fetch_by_id = fail;
    }

    pub fn fail_search(&self, fail: bool) {
        self.knobs.lock().unwrap().fail_search = fail;
    }

    /// Another writer moves the record to `status` just before the next update
    pub fn interleave_write(&self, status: StationStatus) {
        self.knobs.lock().unwrap().concurrent_write = Some(status);
    }

    /// The next update succeeds, but the stored status silently becomes `status`
    pub fn corrupt_next_write(&self, status: StationStatus) {
        self.knobs.lock().unwrap().status_after_write = Some(status);
    }

    pub fn fetch_by_status_calls(&self) -> usize {
        self.calls.fetch_by_status.load(Ordering::SeqCst)
    }

    pub fn fetch_by_id_calls(&self) -> usize {
        self.calls.fetch_by_id.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.calls.update_status.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.calls.search.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.fetch_by_status_calls()
            + self.fetch_by_id_calls()
            + self.update_calls()
            + self.search_calls()
    }

    pub fn search_queries(&self) -> Vec<String> {
        self.search_queries.lock().unwrap().clone()
    }

    fn sorted(mut records: Vec<StationRecord>) -> Vec<StationRecord> {
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        records
    }
}

#[async_trait]
impl StationStore for FakeStationStore {
    async fn fetch_by_status(&self, status: StationStatus) -> StoreResult<Vec<StationRecord>> {
        self.calls.fetch_by_status.fetch_add(1, Ordering::SeqCst);
        let (fail, delay) = {
            let mut knobs = self.knobs.lock().unwrap();
            (knobs.fail_fetch_by_status, knobs.next_status_fetch_delay.take())
        };
        if fail {
            return Err(StoreError::unavailable("injected fetch_by_status failure"));
        }

        let snapshot: Vec<StationRecord> = self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|record| record.status == status)
            .cloned()
            .collect();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(Self::sorted(snapshot))
    }

    async fn fetch_by_id(&self, id: StationId) -> StoreResult<StationRecord> {
        self.calls.fetch_by_id.fetch_add(1, Ordering::SeqCst);
        if self.knobs.lock().unwrap().fail_fetch_by_id {
            return Err(StoreError::unavailable("injected fetch_by_id failure"));
        }
        self.get(id)
            .ok_or_else(|| StoreError::not_found("station", id.to_string()))
    }

    async fn update_status(
        &self,
        id: StationId,
        update: StatusUpdate,
    ) -> StoreResult<StationRecord> {
        self.calls.update_status.fetch_add(1, Ordering::SeqCst);
        let delay = self.knobs.lock().unwrap().update_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let (interleaved, corrupted) = {
            let mut knobs = self.knobs.lock().unwrap();
            (knobs.concurrent_write.take(), knobs.status_after_write.take())
        };

        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("station", id.to_string()))?;
        if let Some(status) = interleaved {
            record.status = status;
        }
        if record.status != update.expected {
            return Err(StoreError::conflict("station", id.to_string()));
        }

        record.status = update.status;
        record.updated_at = update.updated_at;
        let written = record.clone();
        if let Some(status) = corrupted {
            record.status = status;
        }
        Ok(written)
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<StationRecord>> {
        self.calls.search.fetch_add(1, Ordering::SeqCst);
        self.search_queries.lock().unwrap().push(query.to_owned());
        let (fail, delay) = {
            let knobs = self.knobs.lock().unwrap();
            (knobs.fail_search, knobs.search_delays.get(query).copied())
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if fail {
            return Err(StoreError::unavailable("injected search failure"));
        }

        let needle = query.to_lowercase();
        let matches: Vec<StationRecord> = self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|record| record.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(Self::sorted(matches)
            .into_iter()
            .take(FAKE_SEARCH_LIMIT)
            .collect())
    }
}

/// Station created `age_secs` seconds ago, submitted by a known profile
pub fn station(name: &str, status: StationStatus, age_secs: i64) -> StationRecord {
    let created_at = (Utc::now() - ChronoDuration::seconds(age_secs)).trunc_subsecs(6);
    StationRecord {
        id: StationId::new(),
        name: name.to_owned(),
        description: format!("{name} water refill"),
        landmark: None,
        location: GeoPoint {
            latitude: 48.8566,
            longitude: 2.3522,
        },
        status,
        added_by: Uuid::new_v4(),
        submitter: UserProfile::new("ada", "ada@example.com"),
        created_at,
        updated_at: created_at,
    }
}

pub fn moderator() -> CallerContext {
    CallerContext::new(Uuid::new_v4(), CallerRole::Moderator)
}

pub fn submitter() -> CallerContext {
    CallerContext::new(Uuid::new_v4(), CallerRole::Submitter)
}

/// In-memory configuration without the background cache sweep
pub fn test_config() -> ModerationConfig {
    ModerationConfig {
        database: DatabaseUrl::Memory,
        search: SearchConfig::default(),
        cache: ViewCacheConfig {
            cleanup_interval_secs: 0,
            ..ViewCacheConfig::default()
        },
    }
}

/// Dashboard over the fake store
pub async fn create_test_dashboard(store: &Arc<FakeStationStore>) -> Result<ModerationDashboard> {
    init_test_logging();
    let shared: Arc<dyn StationStore> = store.clone();
    Ok(ModerationDashboard::new(shared, &test_config()).await?)
}

/// Fresh in-memory `SQLite` database with migrations applied
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    Ok(Arc::new(database))
}
