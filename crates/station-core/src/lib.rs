// ABOUTME: Core types and constants for the station moderation platform
// ABOUTME: Foundation crate with error handling, station models, permissions, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Station Core
//!
//! Foundation crate providing shared types and constants for the station
//! moderation platform. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `StoreError`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Station records, lifecycle status, and submitter profiles
//! - **permissions**: Caller roles and the privileged-caller capability

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants and configuration values organized by domain
pub mod constants;

/// Core data models (`StationRecord`, `StationStatus`, `UserProfile`, ...)
pub mod models;

/// Caller roles and moderation capability checks
pub mod permissions;
