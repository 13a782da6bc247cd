// ABOUTME: View cache abstraction holding materialized station lists
// ABOUTME: Pluggable backend trait, view keys, and the post-decision synchronization barrier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// In-memory cache implementation
pub mod memory;
/// Invalidate and re-fetch barrier run after each moderation decision
pub mod sync;

pub use sync::{CacheSync, SyncError, SyncReport, ViewSynchronizer};

use crate::config::ViewCacheConfig;
use crate::constants::cache::{
    CACHE_KEY_PREFIX, DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CLEANUP_INTERVAL_SECS, TTL_VIEW_SECS,
};
use crate::errors::AppResult;
use crate::models::StationStatus;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Cache provider trait for pluggable backend implementations
///
/// # Examples
///
/// ```rust,no_run
/// use station_moderation::cache::{CacheConfig, CacheProvider, ViewKey};
/// use station_moderation::cache::memory::InMemoryCache;
/// use std::time::Duration;
/// # async fn example() -> Result<(), station_moderation::errors::AppError> {
///
/// let config = CacheConfig {
///     enable_background_cleanup: false,
///     ..Default::default()
/// };
/// let cache = InMemoryCache::new(config).await?;
///
/// let names = vec!["Fountain Square".to_owned()];
/// cache.set(&ViewKey::PendingList, &names, Duration::from_secs(60)).await?;
///
/// let cached: Option<Vec<String>> = cache.get(&ViewKey::PendingList).await?;
/// assert_eq!(cached, Some(names));
///
/// cache.invalidate_pattern(&ViewKey::all_pattern()).await?;
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait CacheProvider: Send + Sync + Clone {
    /// Create new cache instance with configuration
    ///
    /// # Errors
    ///
    /// Returns an error if cache initialization fails
    async fn new(config: CacheConfig) -> AppResult<Self>
    where
        Self: Sized;

    /// Store value in cache with TTL
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or storage fails
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &ViewKey,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()>;

    /// Retrieve value from cache, `None` if missing or expired
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails
    async fn get<T: for<'de> Deserialize<'de>>(&self, key: &ViewKey) -> AppResult<Option<T>>;

    /// Remove single cache entry
    ///
    /// # Errors
    ///
    /// Returns an error if invalidation fails
    async fn invalidate(&self, key: &ViewKey) -> AppResult<()>;

    /// Remove all entries whose key matches a glob (e.g. `stations:view:*`)
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid
    async fn invalidate_pattern(&self, pattern: &str) -> AppResult<u64>;

    /// Check if a live entry exists for the key
    ///
    /// # Errors
    ///
    /// Returns an error if existence check fails
    async fn exists(&self, key: &ViewKey) -> AppResult<bool>;

    /// Verify cache backend is healthy
    ///
    /// # Errors
    ///
    /// Returns an error if health check fails
    async fn health_check(&self) -> AppResult<()>;

    /// Clear all cache entries
    ///
    /// # Errors
    ///
    /// Returns an error if clear operation fails
    async fn clear_all(&self) -> AppResult<()>;
}

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries
    pub max_entries: usize,
    /// Cleanup interval for expired entries
    pub cleanup_interval: Duration,
    /// Enable background cleanup task
    pub enable_background_cleanup: bool,
    /// TTL applied to every materialized view
    pub view_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
            enable_background_cleanup: true,
            view_ttl: Duration::from_secs(TTL_VIEW_SECS),
        }
    }
}

impl From<&ViewCacheConfig> for CacheConfig {
    /// A cleanup interval of zero disables the background sweep
    fn from(config: &ViewCacheConfig) -> Self {
        Self {
            max_entries: config.max_entries,
            cleanup_interval: Duration::from_secs(config.cleanup_interval_secs),
            enable_background_cleanup: config.cleanup_interval_secs > 0,
            view_ttl: Duration::from_secs(config.ttl_secs),
        }
    }
}

/// Named, independently materialized view of station records
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewKey {
    /// Submissions awaiting review
    PendingList,
    /// Publicly visible stations
    VerifiedList,
    /// Stations flagged for another review
    ReportedList,
    /// View registered by a collaborator, such as the map display
    External {
        /// Registration name, unique per dashboard
        name: String,
    },
}

impl ViewKey {
    /// Externally registered view
    #[must_use]
    pub fn external(name: impl Into<String>) -> Self {
        Self::External { name: name.into() }
    }

    /// Pattern matching every view key
    #[must_use]
    pub fn all_pattern() -> String {
        format!("{CACHE_KEY_PREFIX}*")
    }

    /// Built-in views with the status each one lists
    #[must_use]
    pub const fn builtin() -> [(Self, StationStatus); 3] {
        [
            (Self::PendingList, StationStatus::Unverified),
            (Self::VerifiedList, StationStatus::Verified),
            (Self::ReportedList, StationStatus::Reported),
        ]
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PendingList => write!(f, "{CACHE_KEY_PREFIX}pending"),
            Self::VerifiedList => write!(f, "{CACHE_KEY_PREFIX}verified"),
            Self::ReportedList => write!(f, "{CACHE_KEY_PREFIX}reported"),
            Self::External { name } => write!(f, "{CACHE_KEY_PREFIX}external:{name}"),
        }
    }
}
