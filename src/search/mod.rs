// ABOUTME: Search engine combining immediate remote search, live search, and local filtering
// ABOUTME: Searches never surface errors; failures are logged and yield no results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Local working-set filter
pub mod filter;
/// Debounced live search
pub mod live;

pub use filter::{filter_records, matches_query};
pub use live::{FocusTarget, LiveSearch, LiveSearchState};

use crate::config::SearchConfig;
use crate::database_plugins::StationStore;
use crate::models::StationRecord;
use std::sync::Arc;
use tracing::warn;

/// Entry point for every search mechanism
pub struct SearchEngine {
    store: Arc<dyn StationStore>,
    live: LiveSearch,
}

impl SearchEngine {
    /// Create a search engine over `store`
    #[must_use]
    pub fn new(store: Arc<dyn StationStore>, config: &SearchConfig) -> Self {
        let live = LiveSearch::new(Arc::clone(&store), config.debounce());
        Self { store, live }
    }

    /// Remote name search without debouncing
    ///
    /// Blank queries return nothing without contacting the store.
    pub async fn search_now(&self, query: &str) -> Vec<StationRecord> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        match self.store.search(query).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, query, "Station search failed");
                Vec::new()
            }
        }
    }

    /// Shared live search handle
    #[must_use]
    pub const fn live(&self) -> &LiveSearch {
        &self.live
    }
}
