// ABOUTME: Debounced live search with last-issued-wins result ordering
// ABOUTME: Publishes results and the single-match focus signal on a watch channel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Live Search
//!
//! Every query change aborts the pending quiescence timer and starts a new
//! one. When a timer fires, the remote search runs in its own task and is
//! never aborted; its result is applied only if no newer query change has
//! happened since. Staleness is decided by generation, not by arrival order.

use crate::database_plugins::StationStore;
use crate::models::{GeoPoint, StationId, StationRecord};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Location the caller should center on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusTarget {
    /// The single matching station
    pub station_id: StationId,
    /// Where it is
    pub location: GeoPoint,
}

/// Published live search state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LiveSearchState {
    /// Query change this state belongs to
    pub generation: u64,
    /// Query text of that change
    pub query: String,
    /// Applied results
    pub results: Vec<StationRecord>,
    /// Set when exactly one result was applied
    pub focus: Option<FocusTarget>,
}

impl LiveSearchState {
    fn applied(generation: u64, query: String, results: Vec<StationRecord>) -> Self {
        let focus = match results.as_slice() {
            [only] => Some(FocusTarget {
                station_id: only.id,
                location: only.location,
            }),
            _ => None,
        };
        Self {
            generation,
            query,
            results,
            focus,
        }
    }
}

struct Inner {
    store: Arc<dyn StationStore>,
    debounce: Duration,
    generation: AtomicU64,
    state: watch::Sender<LiveSearchState>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl Inner {
    async fn issue(&self, generation: u64, query: String) {
        debug!(generation, query = %query, "Issuing live search");
        let results = match self.store.search(&query).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, query = %query, "Live search failed");
                Vec::new()
            }
        };

        let applied = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::Acquire) != generation {
                return false;
            }
            *state = LiveSearchState::applied(generation, query, results);
            true
        });
        if !applied {
            debug!(generation, "Discarded superseded live search result");
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(timer) = self
            .timer
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            timer.abort();
        }
    }
}

/// Debounced type-ahead search handle
///
/// Clones share the same timer and state.
#[derive(Clone)]
pub struct LiveSearch {
    inner: Arc<Inner>,
}

impl LiveSearch {
    /// Create a live search issuing queries against `store`
    #[must_use]
    pub fn new(store: Arc<dyn StationStore>, debounce: Duration) -> Self {
        let (state, _) = watch::channel(LiveSearchState::default());
        Self {
            inner: Arc::new(Inner {
                store,
                debounce,
                generation: AtomicU64::new(0),
                state,
                timer: Mutex::new(None),
            }),
        }
    }

    /// React to the query text changing
    ///
    /// Must be called from within a tokio runtime. A blank query clears the
    /// results immediately without contacting the store.
    pub fn on_query_change(&self, query: impl Into<String>) {
        let query = query.into();
        let generation = self.inner.generation.fetch_add(1, Ordering::AcqRel) + 1;

        let mut timer = self
            .inner
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(superseded) = timer.take() {
            superseded.abort();
        }

        if query.trim().is_empty() {
            self.inner.state.send_modify(|state| {
                *state = LiveSearchState {
                    generation,
                    query,
                    ..LiveSearchState::default()
                };
            });
            return;
        }

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let debounce = self.inner.debounce;
        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            // Once issued, the store call runs to completion
            if let Some(inner) = weak.upgrade() {
                tokio::spawn(async move { inner.issue(generation, query).await });
            }
        }));
    }

    /// Latest published state
    #[must_use]
    pub fn snapshot(&self) -> LiveSearchState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified whenever new results or a clear are applied
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LiveSearchState> {
        self.inner.state.subscribe()
    }

    /// Generation of the most recent query change
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::Acquire)
    }

    /// Configured quiescence window
    #[must_use]
    pub fn debounce(&self) -> Duration {
        self.inner.debounce
    }
}
