// ABOUTME: Unified error handling re-exported from station-core
// ABOUTME: AppError, ErrorCode, and StoreError for every layer of the crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use station_core::errors::*;
