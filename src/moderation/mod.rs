// ABOUTME: Moderation workflow driving a station from review into a terminal status
// ABOUTME: Guards, read-verify, conditional write, view synchronization, and post-condition check
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Moderation Workflow
//!
//! A decision runs these steps in order:
//!
//! 1. capability check, before any store access
//! 2. in-flight guard, one unsettled decision per station
//! 3. read-verify of the current record and its allowed transitions
//! 4. conditional write scoped to the status read in step 3
//! 5. view synchronization, awaited
//! 6. post-condition re-fetch, logged as an anomaly on mismatch
//!
//! Failures in steps 1-4 are returned. A failed synchronization is returned
//! as a secondary failure. Step 6 never fails the decision.

mod errors;
mod guard;
mod notice;

pub use errors::ModerationError;
pub use guard::{InFlightTransitions, TransitionGuard};
pub use notice::{DecisionReport, Notice, NoticeLevel};

use crate::cache::{SyncReport, ViewSynchronizer};
use crate::database_plugins::{StationStore, StatusUpdate};
use crate::models::{ModerationOutcome, StationId, StationRecord, StationStatus};
use crate::permissions::PrivilegeCheck;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Timestamp for a transition away from a record last updated at `previous`
///
/// Stored timestamps have microsecond precision, so the result is truncated
/// to microseconds and is always strictly after `previous`.
#[must_use]
pub fn next_transition_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now().trunc_subsecs(6);
    let floor = previous.trunc_subsecs(6) + Duration::microseconds(1);
    now.max(floor)
}

/// State machine applying moderation decisions
pub struct ModerationWorkflow {
    store: Arc<dyn StationStore>,
    sync: Arc<dyn ViewSynchronizer>,
    in_flight: InFlightTransitions,
    anomalies: AtomicU64,
}

impl ModerationWorkflow {
    /// Create a workflow writing to `store` and refreshing views through `sync`
    #[must_use]
    pub fn new(store: Arc<dyn StationStore>, sync: Arc<dyn ViewSynchronizer>) -> Self {
        Self {
            store,
            sync,
            in_flight: InFlightTransitions::new(),
            anomalies: AtomicU64::new(0),
        }
    }

    /// Apply `outcome` to station `id` on behalf of `caller`
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized`, `AlreadyInProgress`, `NotFound`,
    /// `InvalidTransition`, `Conflict` or `StoreUnavailable` when the status
    /// was not changed, and `SyncFailed` when it was written but the
    /// dependent views could not be refreshed.
    #[instrument(skip_all, fields(station_id = %id, %outcome))]
    pub async fn transition(
        &self,
        caller: &dyn PrivilegeCheck,
        id: StationId,
        outcome: ModerationOutcome,
    ) -> Result<StationRecord, ModerationError> {
        if !caller.is_privileged_caller() {
            warn!("Rejected moderation decision from unprivileged caller");
            return Err(ModerationError::Unauthorized);
        }

        let Some(_guard) = self.in_flight.try_acquire(id, outcome) else {
            info!("Moderation decision already in progress");
            return Err(ModerationError::AlreadyInProgress { id });
        };

        let current = self
            .store
            .fetch_by_id(id)
            .await
            .map_err(|e| ModerationError::from_store(id, e))?;

        let requested = outcome.target_status();
        if !current.status.awaits_review() {
            return Err(ModerationError::InvalidTransition {
                id,
                current: current.status,
                requested,
            });
        }

        let update = StatusUpdate {
            expected: current.status,
            status: requested,
            updated_at: next_transition_timestamp(current.updated_at),
        };
        let updated = self
            .store
            .update_status(id, update)
            .await
            .map_err(|e| ModerationError::from_store(id, e))?;
        info!(from = %current.status, to = %requested, "Station status changed");

        let report = self.sync.synchronize(id).await.map_err(|source| {
            error!(error = %source, "Station views failed to synchronize after decision");
            ModerationError::SyncFailed {
                id,
                outcome,
                source,
            }
        })?;

        self.verify_postcondition(id, requested, &report).await;
        Ok(updated)
    }

    /// Re-read the record and the refreshed views; mismatches are only logged
    async fn verify_postcondition(
        &self,
        id: StationId,
        expected: StationStatus,
        report: &SyncReport,
    ) {
        match self.store.fetch_by_id(id).await {
            Ok(record) if record.status == expected => {}
            Ok(record) => self.record_anomaly(
                id,
                &format!("store reports {} after writing {expected}", record.status),
            ),
            Err(e) => self.record_anomaly(id, &format!("post-decision re-fetch failed: {e}")),
        }

        for (view, status) in &report.located_in {
            if *status != expected {
                self.record_anomaly(id, &format!("still listed in {view} ({status})"));
            }
        }
    }

    fn record_anomaly(&self, id: StationId, detail: &str) {
        self.anomalies.fetch_add(1, Ordering::Relaxed);
        warn!(station_id = %id, detail, "Consistency anomaly after moderation decision");
    }

    /// Number of consistency anomalies detected so far
    #[must_use]
    pub fn anomaly_count(&self) -> u64 {
        self.anomalies.load(Ordering::Relaxed)
    }

    /// In-flight markers, for inspection
    #[must_use]
    pub const fn in_flight(&self) -> &InFlightTransitions {
        &self.in_flight
    }
}
