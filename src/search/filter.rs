// ABOUTME: Synchronous local filter over an already materialized working set
// ABOUTME: Case-insensitive substring match on name, description, submitter, and landmark
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::StationRecord;

/// Whether any searchable field of `record` contains `needle`
///
/// `needle` must already be lowercased.
#[must_use]
pub fn matches_query(record: &StationRecord, needle: &str) -> bool {
    record
        .searchable_fields()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Records from `working_set` matching `query`, in their original order
///
/// A blank query returns the working set unchanged.
#[must_use]
pub fn filter_records(working_set: &[StationRecord], query: &str) -> Vec<StationRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return working_set.to_vec();
    }
    working_set
        .iter()
        .filter(|record| matches_query(record, &needle))
        .cloned()
        .collect()
}
