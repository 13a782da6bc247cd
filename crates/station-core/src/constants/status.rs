// ABOUTME: Database string representations for station lifecycle states
// ABOUTME: Mirrors the CHECK constraint on the stations.status column
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Newly submitted, awaiting moderation
pub const UNVERIFIED: &str = "unverified";
/// Approved and publicly visible
pub const VERIFIED: &str = "verified";
/// Declined by a moderator
pub const REJECTED: &str = "rejected";
/// Flagged by users for another review
pub const REPORTED: &str = "reported";
