// ABOUTME: Application constants re-exported from station-core
// ABOUTME: Cache sizing, search debounce, status strings, and sentinel values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use station_core::constants::*;
