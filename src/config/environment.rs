// ABOUTME: Environment-based configuration for the moderation core
// ABOUTME: Parses DATABASE_URL plus search and view cache tuning knobs with defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::database::DatabaseUrl;
use crate::constants::{cache, search, DEFAULT_DATABASE_URL};
use crate::errors::{AppError, AppResult};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Live search and remote search bounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Quiescence window before a live search is issued
    pub debounce_ms: u64,
    /// Maximum rows a remote name search returns
    pub result_limit: u32,
}

impl SearchConfig {
    /// Debounce window as a `Duration`
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: search::DEFAULT_DEBOUNCE_MS,
            result_limit: search::DEFAULT_RESULT_LIMIT,
        }
    }
}

/// View cache sizing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewCacheConfig {
    /// Maximum cached views
    pub max_entries: usize,
    /// TTL of a cached view in seconds
    pub ttl_secs: u64,
    /// Interval between expired-entry sweeps in seconds
    pub cleanup_interval_secs: u64,
}

impl Default for ViewCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: cache::DEFAULT_CACHE_MAX_ENTRIES,
            ttl_secs: cache::TTL_VIEW_SECS,
            cleanup_interval_secs: cache::DEFAULT_CLEANUP_INTERVAL_SECS,
        }
    }
}

/// Complete configuration for the moderation core
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModerationConfig {
    /// Record store location
    pub database: DatabaseUrl,
    /// Search tuning
    pub search: SearchConfig,
    /// View cache tuning
    pub cache: ViewCacheConfig,
}

impl ModerationConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        let database = DatabaseUrl::parse_url(
            &env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned()),
        )?;

        let config = Self {
            database,
            search: SearchConfig {
                debounce_ms: env_parse("SEARCH_DEBOUNCE_MS", search::DEFAULT_DEBOUNCE_MS)?,
                result_limit: env_parse("SEARCH_RESULT_LIMIT", search::DEFAULT_RESULT_LIMIT)?,
            },
            cache: ViewCacheConfig {
                max_entries: env_parse("CACHE_MAX_ENTRIES", cache::DEFAULT_CACHE_MAX_ENTRIES)?,
                ttl_secs: env_parse("VIEW_CACHE_TTL_SECS", cache::TTL_VIEW_SECS)?,
                cleanup_interval_secs: env_parse(
                    "CACHE_CLEANUP_INTERVAL_SECS",
                    cache::DEFAULT_CLEANUP_INTERVAL_SECS,
                )?,
            },
        };

        if config.search.result_limit == 0 {
            return Err(AppError::config("SEARCH_RESULT_LIMIT must be at least 1"));
        }

        info!(
            database = %config.database,
            debounce_ms = config.search.debounce_ms,
            result_limit = config.search.result_limit,
            "Loaded moderation configuration"
        );
        Ok(config)
    }
}

/// Read and parse an optional environment variable
fn env_parse<T>(name: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {name} value '{raw}': {e}"))),
        Err(_) => Ok(default),
    }
}
