// ABOUTME: Core data models for the station moderation platform
// ABOUTME: Re-exports StationRecord, StationStatus, GeoPoint, and UserProfile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `StationRecord`: a submitted point-of-interest joined with its submitter
//! - `StationStatus`: lifecycle state, `Unverified` at creation
//! - `ModerationOutcome`: the two decisions a moderator can make
//! - `GeoPoint`: validated coordinates
//! - `UserProfile`: display-only submitter projection

mod geo;
mod station;
mod user;

pub use geo::GeoPoint;
pub use station::{ModerationOutcome, NewStation, StationId, StationRecord, StationStatus};
pub use user::UserProfile;
