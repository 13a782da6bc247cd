// ABOUTME: Record store factory selecting the backend from the connection string
// ABOUTME: Database enum delegates the StationStore contract and exposes seeding helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Database factory for creating record stores
//!
//! This module provides database type detection and creation based on
//! connection strings.

use super::sqlite::SqliteDatabase;
use super::{StationStore, StatusUpdate};
use crate::database::UserAccount;
use crate::errors::{AppError, AppResult, StoreError, StoreResult};
use crate::models::{NewStation, StationId, StationRecord, StationStatus};
use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

/// Supported database types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// Embedded SQLite (file or in-memory)
    SQLite,
}

/// Record store wrapper that delegates to the selected backend
#[derive(Clone)]
pub enum Database {
    /// SQLite backend
    SQLite(SqliteDatabase),
}

impl Database {
    /// Create a record store based on the connection string
    ///
    /// # Errors
    ///
    /// Returns an error if the URL scheme is unsupported or the backend
    /// cannot be initialized
    pub async fn new(database_url: &str) -> AppResult<Self> {
        debug!(database_url, "Detecting database type");
        let db_type = detect_database_type(database_url)?;

        match db_type {
            DatabaseType::SQLite => {
                let db = SqliteDatabase::new(database_url).await?;
                info!("SQLite record store initialized");
                Ok(Self::SQLite(db))
            }
        }
    }

    /// Override the bound on remote name searches
    #[must_use]
    pub fn with_search_limit(self, limit: u32) -> Self {
        match self {
            Self::SQLite(db) => Self::SQLite(db.with_search_limit(limit)),
        }
    }

    /// Get a descriptive string for the current backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::SQLite(_) => "SQLite (embedded)",
        }
    }

    /// Get the database type enum
    #[must_use]
    pub const fn database_type(&self) -> DatabaseType {
        match self {
            Self::SQLite(_) => DatabaseType::SQLite,
        }
    }

    /// Store a new submission as `unverified` and return the joined record
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the insert fails
    pub async fn insert_station(&self, station: &NewStation) -> AppResult<StationRecord> {
        station.validate()?;
        let id = match self {
            Self::SQLite(db) => db.inner().insert_station(station).await?,
        };
        info!(station_id = %id, name = %station.name, "Station submitted for review");
        Ok(self.fetch_by_id(id).await?)
    }

    /// Flag a station for another review
    ///
    /// Any status moves to `reported`, so `verified` and `rejected` records
    /// re-enter the review queue and can be decided again. Submissions still
    /// awaiting their first decision are reported too.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the station does not exist
    pub async fn report_station(&self, id: StationId) -> StoreResult<()> {
        let written = match self {
            Self::SQLite(db) => {
                db.inner()
                    .force_station_status(id, StationStatus::Reported)
                    .await?
            }
        };
        if written == 0 {
            return Err(StoreError::not_found("station", id.to_string()));
        }
        info!(station_id = %id, "Station reported");
        Ok(())
    }

    /// Create or update a user profile
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails
    pub async fn upsert_user_profile(
        &self,
        username: &str,
        email: &str,
        is_moderator: bool,
    ) -> StoreResult<UserAccount> {
        match self {
            Self::SQLite(db) => {
                db.inner()
                    .upsert_user_profile(username, email, is_moderator)
                    .await
            }
        }
    }

    /// Look up a user profile by email
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_profile_by_email(&self, email: &str) -> StoreResult<Option<UserAccount>> {
        match self {
            Self::SQLite(db) => db.inner().get_user_profile_by_email(email).await,
        }
    }

    /// Look up a user profile by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_profile(&self, id: Uuid) -> StoreResult<Option<UserAccount>> {
        match self {
            Self::SQLite(db) => db.inner().get_user_profile(id).await,
        }
    }
}

/// Detect the database type from a connection string
///
/// # Errors
///
/// Returns a configuration error for any scheme other than `sqlite:`
pub fn detect_database_type(database_url: &str) -> AppResult<DatabaseType> {
    if database_url.starts_with("sqlite:") {
        Ok(DatabaseType::SQLite)
    } else {
        Err(AppError::config(format!(
            "Unsupported database URL format: {database_url}. \
             Supported format: sqlite:path/to/db.sqlite"
        )))
    }
}

#[async_trait]
impl StationStore for Database {
    async fn fetch_by_status(&self, status: StationStatus) -> StoreResult<Vec<StationRecord>> {
        match self {
            Self::SQLite(db) => db.fetch_by_status(status).await,
        }
    }

    async fn fetch_by_id(&self, id: StationId) -> StoreResult<StationRecord> {
        match self {
            Self::SQLite(db) => db.fetch_by_id(id).await,
        }
    }

    async fn update_status(
        &self,
        id: StationId,
        update: StatusUpdate,
    ) -> StoreResult<StationRecord> {
        match self {
            Self::SQLite(db) => db.update_status(id, update).await,
        }
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<StationRecord>> {
        match self {
            Self::SQLite(db) => db.search(query).await,
        }
    }

    async fn health_check(&self) -> StoreResult<()> {
        match self {
            Self::SQLite(db) => db.health_check().await,
        }
    }
}
