// ABOUTME: Configuration management for the moderation core
// ABOUTME: Environment-only configuration for database, search, and view cache settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration is read from environment variables only; there is no
//! configuration file.
//!
//! - **Database**: `DATABASE_URL`
//! - **Search**: `SEARCH_DEBOUNCE_MS`, `SEARCH_RESULT_LIMIT`
//! - **View cache**: `VIEW_CACHE_TTL_SECS`, `CACHE_MAX_ENTRIES`,
//!   `CACHE_CLEANUP_INTERVAL_SECS`

/// Database URL parsing
pub mod database;
/// Top-level configuration assembled from the environment
pub mod environment;

pub use database::DatabaseUrl;
pub use environment::{ModerationConfig, SearchConfig, ViewCacheConfig};
