// ABOUTME: Caller roles and the privileged-moderator capability check
// ABOUTME: CallerContext carries the acting user; PrivilegeCheck gates moderation decisions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Capability consumed by the moderation workflow
///
/// Authentication happens elsewhere; the workflow only asks whether the
/// caller may decide on submissions.
pub trait PrivilegeCheck: Send + Sync {
    /// Whether this caller may approve or reject stations
    fn is_privileged_caller(&self) -> bool;
}

impl PrivilegeCheck for bool {
    fn is_privileged_caller(&self) -> bool {
        *self
    }
}

/// Role of the acting user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CallerRole {
    /// Regular user who submits stations
    #[default]
    Submitter,
    /// Reviewer allowed to decide on submissions
    Moderator,
    /// Full administrator
    Admin,
}

impl CallerRole {
    /// Check if this role may moderate
    #[must_use]
    pub const fn can_moderate(&self) -> bool {
        matches!(self, Self::Moderator | Self::Admin)
    }
}

impl fmt::Display for CallerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submitter => write!(f, "submitter"),
            Self::Moderator => write!(f, "moderator"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Acting user for a dashboard operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallerContext {
    /// User ID of the caller
    pub user_id: Uuid,
    /// Caller's role
    pub role: CallerRole,
}

impl CallerContext {
    /// Create new caller context
    #[must_use]
    pub const fn new(user_id: Uuid, role: CallerRole) -> Self {
        Self { user_id, role }
    }
}

impl PrivilegeCheck for CallerContext {
    fn is_privileged_caller(&self) -> bool {
        self.role.can_moderate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_moderators_and_admins_are_privileged() {
        let id = Uuid::new_v4();
        assert!(!CallerContext::new(id, CallerRole::Submitter).is_privileged_caller());
        assert!(CallerContext::new(id, CallerRole::Moderator).is_privileged_caller());
        assert!(CallerContext::new(id, CallerRole::Admin).is_privileged_caller());
    }
}
