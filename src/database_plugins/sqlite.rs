// ABOUTME: SQLite implementation of the StationStore record store contract
// ABOUTME: Wraps the raw Database and turns zero-row conditional writes into NotFound or Conflict
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! SQLite record store
//!
//! This module wraps the raw SQLite database functionality to implement the
//! `StationStore` trait.

use super::{StationStore, StatusUpdate};
use crate::constants::search::DEFAULT_RESULT_LIMIT;
use crate::database::Database;
use crate::errors::{StoreError, StoreResult};
use crate::models::{StationId, StationRecord, StationStatus};
use async_trait::async_trait;
use tracing::debug;

/// SQLite record store
#[derive(Clone)]
pub struct SqliteDatabase {
    inner: Database,
    search_limit: u32,
}

impl SqliteDatabase {
    /// Connect, migrate, and wrap a SQLite database
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or migrations fail
    pub async fn new(database_url: &str) -> StoreResult<Self> {
        let inner = Database::new(database_url).await?;
        Ok(Self::from_database(inner))
    }

    /// Wrap an already migrated database
    #[must_use]
    pub const fn from_database(inner: Database) -> Self {
        Self {
            inner,
            search_limit: DEFAULT_RESULT_LIMIT,
        }
    }

    /// Override the maximum number of rows `search` returns
    #[must_use]
    pub const fn with_search_limit(mut self, limit: u32) -> Self {
        self.search_limit = limit;
        self
    }

    /// Get a reference to the raw database for non-contract operations
    #[must_use]
    pub const fn inner(&self) -> &Database {
        &self.inner
    }
}

#[async_trait]
impl StationStore for SqliteDatabase {
    async fn fetch_by_status(&self, status: StationStatus) -> StoreResult<Vec<StationRecord>> {
        self.inner.list_stations_by_status(status).await
    }

    async fn fetch_by_id(&self, id: StationId) -> StoreResult<StationRecord> {
        self.inner
            .get_station(id)
            .await?
            .ok_or_else(|| StoreError::not_found("station", id.to_string()))
    }

    async fn update_status(
        &self,
        id: StationId,
        update: StatusUpdate,
    ) -> StoreResult<StationRecord> {
        let written = self
            .inner
            .update_station_status_if(id, update.expected, update.status, update.updated_at)
            .await?;

        if written == 0 {
            // Tell a vanished row apart from a lost compare-and-set
            return match self.inner.get_station(id).await? {
                None => Err(StoreError::not_found("station", id.to_string())),
                Some(current) => {
                    debug!(
                        station_id = %id,
                        expected = %update.expected,
                        found = %current.status,
                        "Conditional status write lost to a concurrent writer"
                    );
                    Err(StoreError::conflict("station", id.to_string()))
                }
            };
        }

        self.fetch_by_id(id).await
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<StationRecord>> {
        self.inner
            .search_stations_by_name(query, self.search_limit)
            .await
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.inner.ping().await
    }
}
