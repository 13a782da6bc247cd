// ABOUTME: Per-station in-flight marker enforcing one unsettled decision per station
// ABOUTME: Scoped TransitionGuard releases its own marker on every exit path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::{ModerationOutcome, StationId};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

#[derive(Debug, Clone, Copy)]
struct InFlight {
    token: u64,
    outcome: ModerationOutcome,
}

/// Map of station IDs to the token of the decision currently running for them
#[derive(Debug, Default)]
pub struct InFlightTransitions {
    entries: DashMap<StationId, InFlight>,
    next_token: AtomicU64,
}

impl InFlightTransitions {
    /// Create an empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` as in flight, or return `None` if it already is
    ///
    /// The check and the insert are one atomic step.
    #[must_use]
    pub fn try_acquire(
        &self,
        id: StationId,
        outcome: ModerationOutcome,
    ) -> Option<TransitionGuard<'_>> {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        match self.entries.entry(id) {
            Entry::Occupied(existing) => {
                trace!(
                    station_id = %id,
                    running = %existing.get().outcome,
                    "Station already has a decision in flight"
                );
                None
            }
            Entry::Vacant(slot) => {
                slot.insert(InFlight { token, outcome });
                Some(TransitionGuard {
                    owner: self,
                    id,
                    token,
                })
            }
        }
    }

    /// Whether a decision for `id` has not settled yet
    #[must_use]
    pub fn is_in_flight(&self, id: StationId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Outcome of the decision running for `id`, if any
    #[must_use]
    pub fn running_outcome(&self, id: StationId) -> Option<ModerationOutcome> {
        self.entries.get(&id).map(|entry| entry.outcome)
    }

    /// Number of unsettled decisions
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no decision is in flight
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Held for the lifetime of one decision; dropping it clears the marker
#[derive(Debug)]
#[must_use = "the in-flight marker is released as soon as the guard is dropped"]
pub struct TransitionGuard<'a> {
    owner: &'a InFlightTransitions,
    id: StationId,
    token: u64,
}

impl Drop for TransitionGuard<'_> {
    fn drop(&mut self) {
        // Only ever remove the marker this guard inserted
        let token = self.token;
        self.owner
            .entries
            .remove_if(&self.id, |_, in_flight| in_flight.token == token);
        trace!(station_id = %self.id, "Released in-flight marker");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_fails_until_release() {
        let transitions = InFlightTransitions::new();
        let id = StationId::new();

        let guard = transitions.try_acquire(id, ModerationOutcome::Verified);
        assert!(guard.is_some());
        assert!(transitions
            .try_acquire(id, ModerationOutcome::Rejected)
            .is_none());
        assert_eq!(
            transitions.running_outcome(id),
            Some(ModerationOutcome::Verified)
        );

        drop(guard);
        assert!(!transitions.is_in_flight(id));
        assert!(transitions
            .try_acquire(id, ModerationOutcome::Rejected)
            .is_some());
        assert!(transitions.is_empty());
    }

    #[test]
    fn test_distinct_stations_do_not_contend() {
        let transitions = InFlightTransitions::new();
        let first = transitions.try_acquire(StationId::new(), ModerationOutcome::Verified);
        let second = transitions.try_acquire(StationId::new(), ModerationOutcome::Verified);
        assert!(first.is_some() && second.is_some());
        assert_eq!(transitions.len(), 2);
    }
}
