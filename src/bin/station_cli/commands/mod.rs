// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for station-cli
// ABOUTME: Provides access to station listing, decision, and user management commands

pub mod decide;
pub mod stations;
pub mod user;
