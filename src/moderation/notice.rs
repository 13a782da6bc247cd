// ABOUTME: User-visible notices produced by moderation decisions
// ABOUTME: DecisionReport pairs the decision result with its transient notification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ModerationError;
use crate::models::{ModerationOutcome, StationId, StationRecord};
use serde::Serialize;
use std::fmt;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Decision applied
    Success,
    /// Decision failed
    Error,
    /// Nothing happened, nothing went wrong
    Info,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// Transient notification shown after a decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Human-readable text
    pub message: String,
    /// Station the decision was about
    pub station_id: StationId,
}

impl Notice {
    /// Build the notice for a finished decision
    #[must_use]
    pub fn for_decision(
        station_id: StationId,
        outcome: ModerationOutcome,
        result: &Result<StationRecord, ModerationError>,
    ) -> Self {
        let (level, message) = match result {
            Ok(record) => (
                NoticeLevel::Success,
                format!("Station \"{}\" {}.", record.name, outcome.verb()),
            ),
            Err(e) if e.is_informational() => (NoticeLevel::Info, e.user_message()),
            Err(e) => (NoticeLevel::Error, e.user_message()),
        };
        Self {
            level,
            message,
            station_id,
        }
    }
}

/// Everything the dashboard learns from one decision
#[derive(Debug)]
pub struct DecisionReport {
    /// Station the decision was about
    pub station_id: StationId,
    /// Requested outcome
    pub outcome: ModerationOutcome,
    /// Updated record, or why the decision did not complete
    pub result: Result<StationRecord, ModerationError>,
    /// Notification for the moderator
    pub notice: Notice,
}

impl DecisionReport {
    /// Pair a decision result with its notice
    #[must_use]
    pub fn new(
        station_id: StationId,
        outcome: ModerationOutcome,
        result: Result<StationRecord, ModerationError>,
    ) -> Self {
        let notice = Notice::for_decision(station_id, outcome, &result);
        Self {
            station_id,
            outcome,
            result,
            notice,
        }
    }

    /// Whether the decision was applied and propagated
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Failure, if any
    #[must_use]
    pub const fn error(&self) -> Option<&ModerationError> {
        match &self.result {
            Ok(_) => None,
            Err(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StationStatus;
    use crate::test_utils::create_test_station;

    #[test]
    fn test_notice_levels_follow_result() {
        let record = create_test_station("Canal Tap", StationStatus::Verified, 5);
        let id = record.id;

        let approved = Notice::for_decision(id, ModerationOutcome::Verified, &Ok(record));
        assert_eq!(approved.level, NoticeLevel::Success);
        assert_eq!(approved.message, "Station \"Canal Tap\" approved.");

        let busy = Notice::for_decision(
            id,
            ModerationOutcome::Rejected,
            &Err(ModerationError::AlreadyInProgress { id }),
        );
        assert_eq!(busy.level, NoticeLevel::Info);

        let missing = DecisionReport::new(
            id,
            ModerationOutcome::Rejected,
            Err(ModerationError::NotFound { id }),
        );
        assert_eq!(missing.notice.level, NoticeLevel::Error);
        assert!(!missing.is_success());
        assert!(missing.error().is_some());
    }
}
