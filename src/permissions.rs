// ABOUTME: Caller roles and capability checks re-exported from station-core
// ABOUTME: PrivilegeCheck gates moderation decisions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use station_core::permissions::*;
