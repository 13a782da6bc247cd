// ABOUTME: In-memory view cache with LRU eviction and TTL support
// ABOUTME: Optional background sweep removes expired views and stops with the last handle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{CacheConfig, CacheProvider, ViewKey};
use crate::errors::{AppError, AppResult, ErrorCode};
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

type ViewStore = Arc<RwLock<LruCache<String, CacheEntry>>>;

#[derive(Debug, Clone)]
struct CacheEntry {
    data: Vec<u8>,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(data: Vec<u8>, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Aborts the sweep task once every cache handle is gone
struct CleanupTask(JoinHandle<()>);

impl Drop for CleanupTask {
    fn drop(&mut self) {
        debug!("Stopping view cache cleanup task");
        self.0.abort();
    }
}

/// In-memory cache with LRU eviction and background cleanup
///
/// Clones share one store. Expiry uses the tokio clock so paused-time tests
/// can advance past a TTL.
#[derive(Clone)]
pub struct InMemoryCache {
    store: ViewStore,
    cleanup: Option<Arc<CleanupTask>>,
}

impl InMemoryCache {
    const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1000) {
        Some(n) => n,
        None => unreachable!(),
    };

    fn new_with_config(config: &CacheConfig) -> Self {
        let capacity =
            NonZeroUsize::new(config.max_entries).unwrap_or(Self::DEFAULT_CACHE_CAPACITY);
        let store: ViewStore = Arc::new(RwLock::new(LruCache::new(capacity)));

        let cleanup = if config.enable_background_cleanup {
            let sweep_store = Arc::clone(&store);
            let cleanup_interval = config.cleanup_interval;
            let handle = tokio::spawn(async move {
                let mut interval = tokio::time::interval(cleanup_interval);
                loop {
                    interval.tick().await;
                    Self::cleanup_expired(&sweep_store).await;
                }
            });
            Some(Arc::new(CleanupTask(handle)))
        } else {
            None
        };

        Self { store, cleanup }
    }

    async fn cleanup_expired(store: &ViewStore) {
        let mut guard = store.write().await;
        let expired: Vec<String> = guard
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            guard.pop(key);
        }
        drop(guard);

        if !expired.is_empty() {
            debug!(removed = expired.len(), "Cleaned up expired view cache entries");
        }
    }

    /// Number of entries currently held, expired or not
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Whether the cache holds no entries
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Whether the background sweep is running
    #[must_use]
    pub const fn has_background_cleanup(&self) -> bool {
        self.cleanup.is_some()
    }
}

#[async_trait::async_trait]
impl CacheProvider for InMemoryCache {
    async fn new(config: CacheConfig) -> AppResult<Self> {
        Ok(Self::new_with_config(&config))
    }

    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &ViewKey,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()> {
        let serialized = serde_json::to_vec(value)?;
        self.store
            .write()
            .await
            .push(key.to_string(), CacheEntry::new(serialized, ttl));
        Ok(())
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, key: &ViewKey) -> AppResult<Option<T>> {
        let key = key.to_string();
        let mut store = self.store.write().await;

        // LruCache::get updates recency, so it needs the write lock
        let Some(entry) = store.get(&key) else {
            return Ok(None);
        };
        if entry.is_expired() {
            store.pop(&key);
            return Ok(None);
        }
        let value = serde_json::from_slice(&entry.data)?;
        drop(store);
        Ok(Some(value))
    }

    async fn invalidate(&self, key: &ViewKey) -> AppResult<()> {
        self.store.write().await.pop(&key.to_string());
        Ok(())
    }

    async fn invalidate_pattern(&self, pattern: &str) -> AppResult<u64> {
        let glob_pattern = glob::Pattern::new(pattern).map_err(|e| {
            AppError::new(
                ErrorCode::StorageError,
                format!("Invalid glob pattern '{pattern}': {e}"),
            )
        })?;

        let mut store = self.store.write().await;
        let matching: Vec<String> = store
            .iter()
            .filter(|(key, _)| glob_pattern.matches(key))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &matching {
            store.pop(key);
        }
        drop(store);

        Ok(matching.len() as u64)
    }

    async fn exists(&self, key: &ViewKey) -> AppResult<bool> {
        let key = key.to_string();
        let mut store = self.store.write().await;
        let expired = match store.peek(&key) {
            Some(entry) => entry.is_expired(),
            None => return Ok(false),
        };
        if expired {
            store.pop(&key);
        }
        Ok(!expired)
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }

    async fn clear_all(&self) -> AppResult<()> {
        self.store.write().await.clear();
        Ok(())
    }
}
