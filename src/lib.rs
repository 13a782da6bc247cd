// ABOUTME: Main library entry point for the station moderation core
// ABOUTME: Moderation workflow, view cache synchronization, and station search
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Station Moderation
//!
//! Registered users submit points-of-interest ("stations"); moderators approve
//! or reject them before they become publicly visible. This crate implements
//! the parts of that system with real invariants:
//!
//! - **Moderation workflow**: the status state machine with one in-flight
//!   decision per station
//! - **Cache synchronization**: after a decision, every dependent view is
//!   invalidated and re-fetched before the decision is reported complete
//! - **Search**: a debounced, last-issued-wins remote search plus a
//!   synchronous local filter over the materialized working set
//! - **Record store**: an async adapter trait with a `SQLite` implementation
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use station_moderation::config::ModerationConfig;
//! use station_moderation::dashboard::ModerationDashboard;
//! use station_moderation::database_plugins::factory::Database;
//! use station_moderation::errors::AppResult;
//! use station_moderation::models::ModerationOutcome;
//! use station_moderation::permissions::{CallerContext, CallerRole};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ModerationConfig::from_env()?;
//!     let database = Database::new(&config.database.to_connection_string()).await?;
//!     let dashboard = ModerationDashboard::new(Arc::new(database), &config).await?;
//!
//!     let moderator = CallerContext::new(uuid::Uuid::new_v4(), CallerRole::Moderator);
//!     for station in dashboard.list_pending().await? {
//!         let report = dashboard
//!             .decide(&moderator, station.id, ModerationOutcome::Verified)
//!             .await;
//!         println!("{}", report.notice.message);
//!     }
//!     Ok(())
//! }
//! ```

/// View cache with pluggable backends and the synchronization barrier
pub mod cache;

/// Configuration loaded from environment variables
pub mod config;

/// Application constants re-exported from `station-core`
pub mod constants;

/// Caller contract consumed by the moderation dashboard
pub mod dashboard;

/// `SQLite` persistence for stations and submitter profiles
pub mod database;

/// Record store abstraction with backend selection
pub mod database_plugins;

/// Unified error handling re-exported from `station-core`
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Station models re-exported from `station-core`
pub mod models;

/// Moderation state machine, in-flight guard, and decision notices
pub mod moderation;

/// Caller roles and the privileged-caller capability
pub mod permissions;

/// Live remote search and local filtering
pub mod search;

/// Test data helpers shared by unit and integration tests
#[cfg(any(test, feature = "testing"))]
pub mod test_utils;
