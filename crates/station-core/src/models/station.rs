// ABOUTME: Station record models for the moderation lifecycle
// ABOUTME: StationId newtype, StationStatus state machine, StationRecord, and NewStation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::constants::status;
use crate::errors::AppError;

use super::{GeoPoint, UserProfile};

/// Type-safe wrapper for station identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub Uuid);

impl StationId {
    /// Create a new random `StationId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID value
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for StationId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for StationId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StationId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| AppError::invalid_input(format!("Invalid station id '{s}': {e}")))
    }
}

/// Station lifecycle status
///
/// `Unverified` is the only creation state. `Verified` and `Rejected` are
/// terminal for moderation purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StationStatus {
    /// Submitted and awaiting review
    #[default]
    Unverified,
    /// Approved for public discovery
    Verified,
    /// Declined by a moderator
    Rejected,
    /// Flagged for another review
    Reported,
}

impl StationStatus {
    /// Every status, in display order
    pub const ALL: [Self; 4] = [
        Self::Unverified,
        Self::Verified,
        Self::Rejected,
        Self::Reported,
    ];

    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unverified => status::UNVERIFIED,
            Self::Verified => status::VERIFIED,
            Self::Rejected => status::REJECTED,
            Self::Reported => status::REPORTED,
        }
    }

    /// Whether no moderation transition leaves this state
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Verified | Self::Rejected)
    }

    /// Whether a moderator may decide on a record in this state
    ///
    /// Both outcomes are reachable from every non-terminal state.
    #[must_use]
    pub const fn awaits_review(&self) -> bool {
        matches!(self, Self::Unverified | Self::Reported)
    }
}

impl fmt::Display for StationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            status::UNVERIFIED => Ok(Self::Unverified),
            status::VERIFIED => Ok(Self::Verified),
            status::REJECTED => Ok(Self::Rejected),
            status::REPORTED => Ok(Self::Reported),
            _ => Err(AppError::invalid_input(format!(
                "Invalid station status: {s}"
            ))),
        }
    }
}

/// Result a moderator can assign to a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationOutcome {
    /// Approve the station
    Verified,
    /// Decline the station
    Rejected,
}

impl ModerationOutcome {
    /// Status the record holds after this outcome is applied
    #[must_use]
    pub const fn target_status(self) -> StationStatus {
        match self {
            Self::Verified => StationStatus::Verified,
            Self::Rejected => StationStatus::Rejected,
        }
    }

    /// Past-tense verb for notices and logs
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Verified => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ModerationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.target_status().as_str())
    }
}

impl FromStr for ModerationOutcome {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            status::VERIFIED | "approve" => Ok(Self::Verified),
            status::REJECTED | "reject" => Ok(Self::Rejected),
            _ => Err(AppError::invalid_input(format!(
                "Invalid moderation outcome: {s}"
            ))),
        }
    }
}

/// A station joined with its submitter's profile
///
/// This is the single canonical shape handed out by the record store; every
/// view (pending list, verified list, search results) uses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    /// Immutable identifier
    pub id: StationId,
    /// Display name
    pub name: String,
    /// Free text description
    pub description: String,
    /// Nearby landmark, if the submitter gave one
    pub landmark: Option<String>,
    /// Coordinates
    pub location: GeoPoint,
    /// Lifecycle status
    pub status: StationStatus,
    /// Submitting user (weak reference)
    pub added_by: Uuid,
    /// Resolved submitter profile, `"Unknown"` when the join fails
    pub submitter: UserProfile,
    /// Submission time
    pub created_at: DateTime<Utc>,
    /// Last status change
    pub updated_at: DateTime<Utc>,
}

impl StationRecord {
    /// Text fields searched by the local filter, in match order
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.name.as_str()),
            Some(self.description.as_str()),
            Some(self.submitter.username.as_str()),
            Some(self.submitter.email.as_str()),
            self.landmark.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}

/// Payload of the submission flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStation {
    /// Display name
    pub name: String,
    /// Free text description
    pub description: String,
    /// Nearby landmark
    pub landmark: Option<String>,
    /// Coordinates
    pub location: GeoPoint,
    /// Submitting user
    pub added_by: Uuid,
}

impl NewStation {
    /// Validate the submission before it is stored
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the coordinates are out of range
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid_input("Station name must not be empty"));
        }
        self.location.validate()
    }
}
