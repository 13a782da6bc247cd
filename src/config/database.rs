// ABOUTME: Database URL parsing for SQLite file and in-memory stores
// ABOUTME: Normalizes DATABASE_URL into a connection string sqlx understands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::DEFAULT_DATABASE_URL;
use crate::errors::{AppError, AppResult};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error if the URL names an unsupported backend
    pub fn parse_url(s: &str) -> AppResult<Self> {
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            if path_str == ":memory:" {
                Ok(Self::Memory)
            } else if path_str.is_empty() {
                Err(AppError::config("DATABASE_URL has an empty SQLite path"))
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str.trim_start_matches("//")),
                })
            }
        } else if s.contains("://") {
            Err(AppError::config(format!(
                "Unsupported database backend in DATABASE_URL: {s}"
            )))
        } else {
            // Bare path: treat as SQLite file
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(DEFAULT_DATABASE_URL).unwrap_or(Self::Memory)
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_memory_and_file_urls() {
        assert_eq!(DatabaseUrl::parse_url("sqlite::memory:").ok(), Some(DatabaseUrl::Memory));
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/stations.db").ok(),
            Some(DatabaseUrl::SQLite {
                path: PathBuf::from("./data/stations.db")
            })
        );
        assert_eq!(
            DatabaseUrl::parse_url("stations.db")
                .ok()
                .map(|url| url.to_connection_string()),
            Some("sqlite:stations.db".to_owned())
        );
    }

    #[test]
    fn test_rejects_other_backends() {
        assert!(DatabaseUrl::parse_url("postgres://localhost/stations").is_err());
        assert!(DatabaseUrl::parse_url("sqlite:").is_err());
    }
}
