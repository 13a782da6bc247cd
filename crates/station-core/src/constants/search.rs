// ABOUTME: Search-related constants for debounce timing and result bounds
// ABOUTME: Shared by the live search engine and the record store adapter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Quiescence window before a live search is issued
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Maximum rows returned by a remote name search
pub const DEFAULT_RESULT_LIMIT: u32 = 20;
