// ABOUTME: Test utilities for creating stations, callers, and configuration consistently
// ABOUTME: Centralizes test data creation shared by unit and integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::{DatabaseUrl, ModerationConfig, SearchConfig, ViewCacheConfig};
use crate::models::{GeoPoint, NewStation, StationId, StationRecord, StationStatus, UserProfile};
use crate::permissions::{CallerContext, CallerRole};
use chrono::{Duration, SubsecRound, Utc};
use uuid::Uuid;

/// Submission payload with a fixed location
#[must_use]
pub fn create_test_new_station(name: &str, added_by: Uuid) -> NewStation {
    NewStation {
        name: name.to_owned(),
        description: format!("{name} refill point"),
        landmark: None,
        location: GeoPoint {
            latitude: 52.52,
            longitude: 13.405,
        },
        added_by,
    }
}

/// Stored record, created `age_secs` seconds ago
#[must_use]
pub fn create_test_station(name: &str, status: StationStatus, age_secs: i64) -> StationRecord {
    let created_at = (Utc::now() - Duration::seconds(age_secs)).trunc_subsecs(6);
    StationRecord {
        id: StationId::new(),
        name: name.to_owned(),
        description: format!("{name} refill point"),
        landmark: None,
        location: GeoPoint {
            latitude: 52.52,
            longitude: 13.405,
        },
        status,
        added_by: Uuid::new_v4(),
        submitter: UserProfile::new("submitter", "submitter@example.com"),
        created_at,
        updated_at: created_at,
    }
}

/// Caller holding the moderator capability
#[must_use]
pub fn create_test_moderator() -> CallerContext {
    CallerContext::new(Uuid::new_v4(), CallerRole::Moderator)
}

/// Caller without the moderator capability
#[must_use]
pub fn create_test_submitter() -> CallerContext {
    CallerContext::new(Uuid::new_v4(), CallerRole::Submitter)
}

/// In-memory configuration with the background cache sweep disabled
#[must_use]
pub fn create_test_config() -> ModerationConfig {
    ModerationConfig {
        database: DatabaseUrl::Memory,
        search: SearchConfig::default(),
        cache: ViewCacheConfig {
            cleanup_interval_secs: 0,
            ..ViewCacheConfig::default()
        },
    }
}
