// ABOUTME: Moderation decision failures and their user-facing messages
// ABOUTME: Maps record store errors per station and converts into AppError at the boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::cache::SyncError;
use crate::errors::{AppError, ErrorCode, StoreError};
use crate::models::{ModerationOutcome, StationId, StationStatus};
use thiserror::Error;

/// Why a moderation decision did not complete
#[derive(Debug, Error)]
pub enum ModerationError {
    /// Caller lacks the moderator capability
    #[error("caller is not allowed to moderate stations")]
    Unauthorized,

    /// The station does not exist
    #[error("station {id} not found")]
    NotFound {
        /// Requested station
        id: StationId,
    },

    /// Another decision for the same station has not settled yet
    #[error("a decision for station {id} is already in progress")]
    AlreadyInProgress {
        /// Contended station
        id: StationId,
    },

    /// The station's current status admits no moderation decision
    #[error("station {id} is {current} and cannot become {requested}")]
    InvalidTransition {
        /// Station being decided
        id: StationId,
        /// Status found by the read-verify step
        current: StationStatus,
        /// Status the decision asked for
        requested: StationStatus,
    },

    /// Another writer changed the status between read and write
    #[error("station {id} was modified concurrently")]
    Conflict {
        /// Station being decided
        id: StationId,
    },

    /// The record store could not be reached or returned unusable data
    #[error("record store unavailable: {context}")]
    StoreUnavailable {
        /// Underlying failure
        context: String,
    },

    /// The status change was written but dependent views failed to refresh
    #[error("station {id} was {} but its views could not be refreshed: {source}", .outcome.verb())]
    SyncFailed {
        /// Station that was decided
        id: StationId,
        /// Decision that was written
        outcome: ModerationOutcome,
        /// Synchronization failure
        #[source]
        source: SyncError,
    },
}

impl ModerationError {
    /// Translate a store failure for a decision on `id`
    #[must_use]
    pub fn from_store(id: StationId, error: StoreError) -> Self {
        match error {
            StoreError::NotFound { .. } => Self::NotFound { id },
            StoreError::Conflict { .. } => Self::Conflict { id },
            StoreError::Unavailable { context } => Self::StoreUnavailable { context },
            other => Self::StoreUnavailable {
                context: other.to_string(),
            },
        }
    }

    /// Text shown to the moderator
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized => "Only moderators can approve or reject stations.".to_owned(),
            Self::NotFound { .. } => {
                "This station no longer exists. It may have been removed.".to_owned()
            }
            Self::AlreadyInProgress { .. } => {
                "A decision for this station is already being processed.".to_owned()
            }
            Self::InvalidTransition { current, .. } => {
                format!("This station is already {current} and cannot be changed.")
            }
            Self::Conflict { .. } => {
                "Another moderator updated this station first. Refresh and try again.".to_owned()
            }
            Self::StoreUnavailable { .. } => {
                "The station database could not be reached. Please try again.".to_owned()
            }
            Self::SyncFailed { outcome, .. } => format!(
                "The station was {}, but the lists could not be refreshed. Reload to see the latest state.",
                outcome.verb()
            ),
        }
    }

    /// Whether the failure is a no-op state rather than an error
    #[must_use]
    pub const fn is_informational(&self) -> bool {
        matches!(self, Self::AlreadyInProgress { .. })
    }

    /// Whether the status change itself may have persisted
    #[must_use]
    pub const fn is_secondary(&self) -> bool {
        matches!(self, Self::SyncFailed { .. })
    }

    /// Standard error code for this failure
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Unauthorized => ErrorCode::PermissionDenied,
            Self::NotFound { .. } => ErrorCode::ResourceNotFound,
            Self::AlreadyInProgress { .. } => ErrorCode::ResourceLocked,
            Self::InvalidTransition { .. } => ErrorCode::InvalidInput,
            Self::Conflict { .. } => ErrorCode::ResourceConflict,
            Self::StoreUnavailable { .. } => ErrorCode::ResourceUnavailable,
            Self::SyncFailed { .. } => ErrorCode::StorageError,
        }
    }
}

impl From<ModerationError> for AppError {
    fn from(error: ModerationError) -> Self {
        Self::new(error.code(), error.to_string()).with_source(error)
    }
}
