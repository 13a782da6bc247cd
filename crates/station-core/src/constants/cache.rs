// ABOUTME: View cache constants for TTL, capacity, and cleanup intervals
// ABOUTME: Defaults for the in-memory moderation view cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Default maximum cache entries for in-memory cache
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 1_000;

/// Default cleanup interval in seconds for expired entries
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 300; // 5 minutes

/// Station list view TTL (5 minutes); decisions refresh views explicitly
pub const TTL_VIEW_SECS: u64 = 300;

/// Cache key prefix for namespacing
pub const CACHE_KEY_PREFIX: &str = "stations:view:";
