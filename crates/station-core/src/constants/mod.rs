// ABOUTME: Application-wide constants organized by domain
// ABOUTME: Search debounce, cache sizing, status strings, and sentinel values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// View cache sizing and TTL defaults
pub mod cache;

/// Live search and local filter defaults
pub mod search;

/// Database string representations of station status
pub mod status;

/// Service identity used in structured logging
pub mod service_names {
    /// Name reported by the logging subsystem
    pub const STATION_MODERATION: &str = "station-moderation";
}

/// Placeholder shown when a submitter profile cannot be joined
pub const UNKNOWN_PROFILE: &str = "Unknown";

/// Default database location when `DATABASE_URL` is not set
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/stations.db";
