// ABOUTME: Submitter profile projection joined onto station records
// ABOUTME: Display-only username and email with an "Unknown" sentinel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::UNKNOWN_PROFILE;

/// Display attributes of the user who submitted a station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Public handle
    pub username: String,
    /// Contact address shown to moderators
    pub email: String,
}

impl UserProfile {
    /// Create a profile projection
    #[must_use]
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }

    /// Profile used when the submitter cannot be resolved
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_PROFILE, UNKNOWN_PROFILE)
    }

    /// Fill missing join columns with the sentinel
    #[must_use]
    pub fn from_join(username: Option<String>, email: Option<String>) -> Self {
        Self {
            username: username.unwrap_or_else(|| UNKNOWN_PROFILE.to_owned()),
            email: email.unwrap_or_else(|| UNKNOWN_PROFILE.to_owned()),
        }
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::unknown()
    }
}
