// ABOUTME: SQLite persistence for station records and submitter profiles
// ABOUTME: Owns the connection pool, schema migrations, and raw row operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! Raw `sqlx` access to the `stations` and `user_profiles` tables. The
//! record store contract (conditional writes, error taxonomy) is layered on
//! top in `database_plugins`.

mod profiles;
mod stations;

pub use profiles::UserAccount;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::debug;

use crate::errors::{StoreError, StoreResult};

/// Database manager for station and profile storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn new(database_url: &str) -> StoreResult<Self> {
        let is_memory = database_url.contains(":memory:");
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        if let Some(parent) = options.get_filename().parent() {
            if !is_memory && !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    StoreError::unavailable(format!(
                        "Failed to create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        // Every in-memory connection is a separate database, so pin the pool to one
        let pool = SqlitePoolOptions::new()
            .max_connections(if is_memory { 1 } else { 5 })
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;
        debug!(database_url, "Station database ready");
        Ok(db)
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub async fn migrate(&self) -> StoreResult<()> {
        self.migrate_profiles().await?;
        self.migrate_stations().await?;
        Ok(())
    }

    /// Cheap round trip proving the store is reachable
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
