// ABOUTME: Unit tests for the in-memory view cache
// ABOUTME: Tests TTL expiration, capacity limits, pattern invalidation, and background cleanup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use station_moderation::cache::{memory::InMemoryCache, CacheConfig, CacheProvider, ViewKey};
use station_moderation::config::ViewCacheConfig;
use std::time::Duration;

/// Helper: Create in-memory cache with custom config
async fn create_test_cache(max_entries: usize) -> Result<InMemoryCache> {
    let config = CacheConfig {
        max_entries,
        enable_background_cleanup: false,
        ..CacheConfig::default()
    };
    Ok(InMemoryCache::new(config).await?)
}

#[tokio::test]
async fn test_cache_set_and_get() -> Result<()> {
    let cache = create_test_cache(100).await?;
    let names = vec!["Fountain Square".to_owned(), "Pier Tap".to_owned()];

    cache
        .set(&ViewKey::PendingList, &names, Duration::from_secs(10))
        .await?;

    let retrieved: Option<Vec<String>> = cache.get(&ViewKey::PendingList).await?;
    assert_eq!(retrieved, Some(names));
    let missing: Option<Vec<String>> = cache.get(&ViewKey::VerifiedList).await?;
    assert_eq!(missing, None);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_cache_expiration() -> Result<()> {
    let cache = create_test_cache(100).await?;
    cache
        .set(&ViewKey::VerifiedList, &vec![1_u32], Duration::from_secs(1))
        .await?;
    assert!(cache.exists(&ViewKey::VerifiedList).await?);

    tokio::time::sleep(Duration::from_millis(1_100)).await;

    let retrieved: Option<Vec<u32>> = cache.get(&ViewKey::VerifiedList).await?;
    assert_eq!(retrieved, None);
    assert!(!cache.exists(&ViewKey::VerifiedList).await?);
    assert!(cache.is_empty().await);

    Ok(())
}

#[tokio::test]
async fn test_pattern_invalidation_covers_every_view() -> Result<()> {
    let cache = create_test_cache(100).await?;
    let ttl = Duration::from_secs(60);
    let map = ViewKey::external("map");

    for key in [&ViewKey::PendingList, &ViewKey::ReportedList, &map] {
        cache.set(key, &Vec::<u32>::new(), ttl).await?;
    }

    let removed = cache.invalidate_pattern(&ViewKey::all_pattern()).await?;
    assert_eq!(removed, 3);
    assert!(cache.is_empty().await);
    assert_eq!(cache.invalidate_pattern("stations:view:*").await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_pattern_invalidation_is_selective() -> Result<()> {
    let cache = create_test_cache(100).await?;
    let ttl = Duration::from_secs(60);
    cache.set(&ViewKey::external("map"), &0_u8, ttl).await?;
    cache.set(&ViewKey::external("mobile"), &0_u8, ttl).await?;
    cache.set(&ViewKey::PendingList, &0_u8, ttl).await?;

    let removed = cache
        .invalidate_pattern("stations:view:external:*")
        .await?;
    assert_eq!(removed, 2);
    assert!(cache.exists(&ViewKey::PendingList).await?);

    Ok(())
}

#[tokio::test]
async fn test_invalid_pattern_is_an_error() -> Result<()> {
    let cache = create_test_cache(100).await?;
    assert!(cache.invalidate_pattern("stations:view:[").await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_lru_eviction_at_capacity() -> Result<()> {
    let cache = create_test_cache(2).await?;
    let ttl = Duration::from_secs(60);

    cache.set(&ViewKey::PendingList, &1_u8, ttl).await?;
    cache.set(&ViewKey::VerifiedList, &2_u8, ttl).await?;
    // Touch pending so verified becomes least recently used
    let _: Option<u8> = cache.get(&ViewKey::PendingList).await?;
    cache.set(&ViewKey::ReportedList, &3_u8, ttl).await?;

    assert!(cache.exists(&ViewKey::PendingList).await?);
    assert!(!cache.exists(&ViewKey::VerifiedList).await?);
    assert!(cache.exists(&ViewKey::ReportedList).await?);
    assert_eq!(cache.len().await, 2);

    Ok(())
}

#[tokio::test]
async fn test_invalidate_and_clear_all() -> Result<()> {
    let cache = create_test_cache(100).await?;
    let ttl = Duration::from_secs(60);
    cache.set(&ViewKey::PendingList, &1_u8, ttl).await?;
    cache.set(&ViewKey::VerifiedList, &2_u8, ttl).await?;

    cache.invalidate(&ViewKey::PendingList).await?;
    assert!(!cache.exists(&ViewKey::PendingList).await?);
    assert!(cache.exists(&ViewKey::VerifiedList).await?);

    cache.clear_all().await?;
    assert!(cache.is_empty().await);
    cache.health_check().await?;

    Ok(())
}

#[tokio::test]
async fn test_clones_share_entries() -> Result<()> {
    let cache = create_test_cache(100).await?;
    let handle = cache.clone();

    handle
        .set(&ViewKey::PendingList, &7_u8, Duration::from_secs(60))
        .await?;
    drop(handle);

    let value: Option<u8> = cache.get(&ViewKey::PendingList).await?;
    assert_eq!(value, Some(7));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_background_cleanup_removes_expired_views() -> Result<()> {
    let cache = InMemoryCache::new(CacheConfig {
        cleanup_interval: Duration::from_secs(1),
        enable_background_cleanup: true,
        ..CacheConfig::default()
    })
    .await?;
    assert!(cache.has_background_cleanup());

    cache
        .set(&ViewKey::PendingList, &1_u8, Duration::from_millis(500))
        .await?;
    cache
        .set(&ViewKey::VerifiedList, &2_u8, Duration::from_secs(60))
        .await?;

    tokio::time::sleep(Duration::from_millis(2_500)).await;

    // Only the sweep could have removed the expired entry
    assert_eq!(cache.len().await, 1);
    assert!(cache.exists(&ViewKey::VerifiedList).await?);

    Ok(())
}

#[test]
fn test_zero_cleanup_interval_disables_sweep() {
    let config = CacheConfig::from(&ViewCacheConfig {
        max_entries: 10,
        ttl_secs: 30,
        cleanup_interval_secs: 0,
    });
    assert!(!config.enable_background_cleanup);
    assert_eq!(config.view_ttl, Duration::from_secs(30));

    let config = CacheConfig::from(&ViewCacheConfig::default());
    assert!(config.enable_background_cleanup);
}
