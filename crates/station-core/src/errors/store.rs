// ABOUTME: Structured error types for record store operations
// ABOUTME: Distinguishes vanished records, transport failures, and concurrent modification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Errors returned by a record store adapter
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    /// The record does not exist (or vanished between read and write)
    #[error("{entity} '{id}' not found")]
    NotFound {
        /// Kind of record that was looked up
        entity: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// Transport, connection, or authorization failure talking to the store
    #[error("record store unavailable: {context}")]
    Unavailable {
        /// Underlying failure description
        context: String,
    },

    /// The store reported a concurrent modification of the record
    #[error("{entity} '{id}' was modified concurrently")]
    Conflict {
        /// Kind of record being written
        entity: &'static str,
        /// Identifier being written
        id: String,
    },

    /// A stored row could not be decoded into a record
    #[error("invalid stored data: {context}")]
    InvalidData {
        /// What failed to decode
        context: String,
    },
}

impl StoreError {
    /// Create a "not found" error
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create an "unavailable" error
    #[must_use]
    pub fn unavailable(context: impl Into<String>) -> Self {
        Self::Unavailable {
            context: context.into(),
        }
    }

    /// Create a "conflict" error
    #[must_use]
    pub fn conflict(entity: &'static str, id: impl Into<String>) -> Self {
        Self::Conflict {
            entity,
            id: id.into(),
        }
    }

    /// Create an "invalid data" error
    #[must_use]
    pub fn invalid_data(context: impl Into<String>) -> Self {
        Self::InvalidData {
            context: context.into(),
        }
    }
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::not_found("row", String::new()),
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                Self::invalid_data(error.to_string())
            }
            other => Self::unavailable(other.to_string()),
        }
    }
}

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;
