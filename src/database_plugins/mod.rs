// ABOUTME: Record store abstraction consumed by the moderation workflow and search engine
// ABOUTME: StationStore trait with conditional status writes plus the SQLite backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::StoreResult;
use crate::models::{StationId, StationRecord, StationStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub mod factory;
pub mod sqlite;

/// Conditional status write
///
/// The write only applies while the stored status still equals `expected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    /// Status observed by the caller's read-verify step
    pub expected: StationStatus,
    /// Status to write
    pub status: StationStatus,
    /// Timestamp recorded as `updated_at`
    pub updated_at: DateTime<Utc>,
}

/// Core record store abstraction
///
/// All store implementations must implement this trait to provide a
/// consistent interface to the workflow, the search engine, and the view
/// cache. Implementations hold no local mutable state.
#[async_trait]
pub trait StationStore: Send + Sync {
    /// Records in one status, joined with submitter profiles, newest first
    ///
    /// Either the complete sequence is returned or the call fails.
    async fn fetch_by_status(&self, status: StationStatus) -> StoreResult<Vec<StationRecord>>;

    /// One record by ID, failing with `NotFound` when absent
    async fn fetch_by_id(&self, id: StationId) -> StoreResult<StationRecord>;

    /// Conditional status write scoped to `id` and the expected prior status
    ///
    /// Fails with `NotFound` if the record vanished and `Conflict` if another
    /// writer changed its status first.
    async fn update_status(&self, id: StationId, update: StatusUpdate)
        -> StoreResult<StationRecord>;

    /// Case-insensitive substring search over station names
    ///
    /// The result count is bounded by the store.
    async fn search(&self, query: &str) -> StoreResult<Vec<StationRecord>>;

    /// Check that the store is reachable
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
