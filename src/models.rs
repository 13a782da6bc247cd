// ABOUTME: Station models re-exported from station-core
// ABOUTME: StationRecord, StationStatus, ModerationOutcome, GeoPoint, and UserProfile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use station_core::models::*;
