// ABOUTME: Integration tests for the SQLite record store and its dashboard wiring
// ABOUTME: Covers profile joins, ordering, conditional status writes, search escaping, and reporting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use chrono::{Duration as ChronoDuration, Utc};
use common::{create_test_database, moderator, test_config};
use station_moderation::{
    dashboard::ModerationDashboard,
    database_plugins::{factory::Database, StationStore, StatusUpdate},
    errors::{ErrorCode, StoreError},
    models::{GeoPoint, ModerationOutcome, NewStation, StationId, StationRecord, StationStatus},
};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

fn submission(name: &str, added_by: Uuid) -> NewStation {
    NewStation {
        name: name.to_owned(),
        description: "Public drinking water".to_owned(),
        landmark: Some("Town hall".to_owned()),
        location: GeoPoint {
            latitude: 45.764,
            longitude: 4.8357,
        },
        added_by,
    }
}

async fn insert_named(database: &Database, names: &[&str]) -> Result<Vec<StationRecord>> {
    let mut records = Vec::with_capacity(names.len());
    for name in names {
        records.push(database.insert_station(&submission(name, Uuid::new_v4())).await?);
        // Distinct creation times keep the newest-first order deterministic
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    Ok(records)
}

fn names(records: &[StationRecord]) -> Vec<&str> {
    records.iter().map(|record| record.name.as_str()).collect()
}

#[tokio::test]
async fn test_insert_joins_submitter_profile() -> Result<()> {
    let database = create_test_database().await?;
    let account = database
        .upsert_user_profile("ada", "ada@example.com", false)
        .await?;

    let record = database
        .insert_station(&submission("Fountain Square", account.id))
        .await?;

    assert_eq!(record.status, StationStatus::Unverified);
    assert_eq!(record.added_by, account.id);
    assert_eq!(record.submitter.username, "ada");
    assert_eq!(record.submitter.email, "ada@example.com");
    assert_eq!(record.landmark.as_deref(), Some("Town hall"));
    assert_eq!(record.created_at, record.updated_at);
    assert_eq!(database.fetch_by_id(record.id).await?, record);

    Ok(())
}

#[tokio::test]
async fn test_missing_profile_falls_back_to_unknown() -> Result<()> {
    let database = create_test_database().await?;

    let record = database
        .insert_station(&submission("Pier Tap", Uuid::new_v4()))
        .await?;

    assert_eq!(record.submitter.username, "Unknown");
    assert_eq!(record.submitter.email, "Unknown");

    Ok(())
}

#[tokio::test]
async fn test_invalid_submissions_are_rejected_before_insert() -> Result<()> {
    let database = create_test_database().await?;

    let mut off_planet = submission("Moon Tap", Uuid::new_v4());
    off_planet.location.latitude = 95.0;
    let error = database.insert_station(&off_planet).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ValueOutOfRange);

    let unnamed = submission("  ", Uuid::new_v4());
    let error = database.insert_station(&unnamed).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);

    assert!(database
        .fetch_by_status(StationStatus::Unverified)
        .await?
        .is_empty());

    Ok(())
}

#[tokio::test]
async fn test_fetch_by_status_is_newest_first() -> Result<()> {
    let database = create_test_database().await?;
    let inserted = insert_named(&database, &["Oldest", "Middle", "Newest"]).await?;
    database
        .update_status(
            inserted[1].id,
            StatusUpdate {
                expected: StationStatus::Unverified,
                status: StationStatus::Verified,
                updated_at: Utc::now(),
            },
        )
        .await?;

    let pending = database.fetch_by_status(StationStatus::Unverified).await?;
    assert_eq!(names(&pending), ["Newest", "Oldest"]);
    let verified = database.fetch_by_status(StationStatus::Verified).await?;
    assert_eq!(names(&verified), ["Middle"]);
    assert!(database
        .fetch_by_status(StationStatus::Rejected)
        .await?
        .is_empty());

    Ok(())
}

#[tokio::test]
async fn test_conditional_update_detects_lost_race() -> Result<()> {
    let database = create_test_database().await?;
    let record = database
        .insert_station(&submission("Fountain Square", Uuid::new_v4()))
        .await?;
    let at = record.updated_at + ChronoDuration::seconds(5);

    let updated = database
        .update_status(
            record.id,
            StatusUpdate {
                expected: StationStatus::Unverified,
                status: StationStatus::Verified,
                updated_at: at,
            },
        )
        .await?;
    assert_eq!(updated.status, StationStatus::Verified);
    assert_eq!(updated.updated_at, at);

    let stale = database
        .update_status(
            record.id,
            StatusUpdate {
                expected: StationStatus::Unverified,
                status: StationStatus::Rejected,
                updated_at: Utc::now(),
            },
        )
        .await;
    assert!(matches!(stale, Err(StoreError::Conflict { .. })));
    assert_eq!(
        database.fetch_by_id(record.id).await?.status,
        StationStatus::Verified
    );

    let missing = database
        .update_status(
            StationId::new(),
            StatusUpdate {
                expected: StationStatus::Unverified,
                status: StationStatus::Verified,
                updated_at: Utc::now(),
            },
        )
        .await;
    assert!(matches!(missing, Err(StoreError::NotFound { .. })));

    Ok(())
}

#[tokio::test]
async fn test_fetch_missing_station_is_not_found() -> Result<()> {
    let database = create_test_database().await?;
    let result = database.fetch_by_id(StationId::new()).await;
    assert!(matches!(result, Err(StoreError::NotFound { .. })));
    Ok(())
}

#[tokio::test]
async fn test_search_is_case_insensitive_substring() -> Result<()> {
    let database = create_test_database().await?;
    insert_named(&database, &["Fountain Square", "FOUNTAIN PARK", "Pier Tap"]).await?;

    let results = database.search("fountain").await?;
    assert_eq!(names(&results), ["FOUNTAIN PARK", "Fountain Square"]);
    assert_eq!(names(&database.search("  tap ").await?), ["Pier Tap"]);
    assert!(database.search("harbour").await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_search_folds_non_ascii_case() -> Result<()> {
    let database = create_test_database().await?;
    let inserted = insert_named(&database, &["École Fontaine", "ÜBERSEE Tap", "Pier Tap"]).await?;

    let accented = database.search("école").await?;
    assert_eq!(names(&accented), ["École Fontaine"]);
    assert_eq!(names(&database.search(" übersee ").await?), ["ÜBERSEE Tap"]);
    assert_eq!(names(&database.search("ÉCOLE").await?), ["École Fontaine"]);

    // Remote and local matching agree on the same records
    assert_eq!(ModerationDashboard::filter(&inserted, "école"), accented);

    Ok(())
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() -> Result<()> {
    let database = create_test_database().await?;
    insert_named(&database, &["100% Juice", "1000 Wells", "Tap_House", "Tap House"]).await?;

    assert_eq!(names(&database.search("100%").await?), ["100% Juice"]);
    assert_eq!(names(&database.search("p_h").await?), ["Tap_House"]);

    Ok(())
}

#[tokio::test]
async fn test_search_respects_result_limit() -> Result<()> {
    let database = Database::new("sqlite::memory:")
        .await?
        .with_search_limit(3);
    let database = Arc::new(database);
    insert_named(&database, &["Well 1", "Well 2", "Well 3", "Well 4", "Well 5"]).await?;

    let results = database.search("well").await?;
    assert_eq!(names(&results), ["Well 5", "Well 4", "Well 3"]);

    Ok(())
}

#[tokio::test]
async fn test_report_moves_station_back_to_review() -> Result<()> {
    let database = create_test_database().await?;
    let record = database
        .insert_station(&submission("Fountain Square", Uuid::new_v4()))
        .await?;

    database.report_station(record.id).await?;
    assert_eq!(
        database.fetch_by_id(record.id).await?.status,
        StationStatus::Reported
    );

    let missing = database.report_station(StationId::new()).await;
    assert!(matches!(missing, Err(StoreError::NotFound { .. })));

    Ok(())
}

#[tokio::test]
async fn test_report_reopens_a_decided_station() -> Result<()> {
    let database = create_test_database().await?;
    let record = database
        .insert_station(&submission("Pier Tap", Uuid::new_v4()))
        .await?;
    database
        .update_status(
            record.id,
            StatusUpdate {
                expected: StationStatus::Unverified,
                status: StationStatus::Rejected,
                updated_at: Utc::now(),
            },
        )
        .await?;

    database.report_station(record.id).await?;
    assert!(database.fetch_by_id(record.id).await?.status.awaits_review());

    let verified = database
        .update_status(
            record.id,
            StatusUpdate {
                expected: StationStatus::Reported,
                status: StationStatus::Verified,
                updated_at: Utc::now(),
            },
        )
        .await?;
    assert_eq!(verified.status, StationStatus::Verified);

    Ok(())
}

#[tokio::test]
async fn test_profile_upsert_keeps_identity() -> Result<()> {
    let database = create_test_database().await?;
    let first = database
        .upsert_user_profile("ada", "ada@example.com", false)
        .await?;
    let promoted = database
        .upsert_user_profile("ada.l", "ada@example.com", true)
        .await?;

    assert_eq!(promoted.id, first.id);
    assert!(promoted.is_moderator);
    assert_eq!(
        database
            .get_user_profile_by_email("ada@example.com")
            .await?
            .map(|account| account.username),
        Some("ada.l".to_owned())
    );
    assert!(database.get_user_profile(Uuid::new_v4()).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_dashboard_decision_over_sqlite() -> Result<()> {
    let database = create_test_database().await?;
    let reviewer = database
        .upsert_user_profile("grace", "grace@example.com", true)
        .await?;
    let record = database
        .insert_station(&submission("Fountain Square", Uuid::new_v4()))
        .await?;

    let store: Arc<dyn StationStore> = database.clone();
    let dashboard = ModerationDashboard::new(store, &test_config()).await?;
    assert_eq!(names(&dashboard.list_pending().await?), ["Fountain Square"]);

    let report = dashboard
        .decide(
            &reviewer.caller_context(),
            record.id,
            ModerationOutcome::Verified,
        )
        .await;
    let updated = report.result?;

    assert!(updated.updated_at > record.updated_at);
    assert!(dashboard.list_pending().await?.is_empty());
    assert_eq!(dashboard.list_verified().await?, vec![updated]);
    assert_eq!(dashboard.workflow().anomaly_count(), 0);

    let again = dashboard
        .decide(&moderator(), record.id, ModerationOutcome::Rejected)
        .await;
    assert!(!again.is_success());
    assert_eq!(
        database.fetch_by_id(record.id).await?.status,
        StationStatus::Verified
    );

    Ok(())
}
