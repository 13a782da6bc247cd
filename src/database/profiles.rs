// ABOUTME: User profile table: submitter display data and the moderator flag
// ABOUTME: Profiles are looked up by email for CLI callers and joined onto station reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Database;
use crate::errors::{StoreError, StoreResult};
use crate::models::UserProfile;
use crate::permissions::{CallerContext, CallerRole};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

/// Stored user account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Account ID, referenced by `stations.added_by`
    pub id: Uuid,
    /// Public handle
    pub username: String,
    /// Unique contact address
    pub email: String,
    /// Whether this user may moderate submissions
    pub is_moderator: bool,
    /// Account creation time
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// Display projection joined onto station records
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile::new(&self.username, &self.email)
    }

    /// Caller context for dashboard operations performed by this user
    #[must_use]
    pub const fn caller_context(&self) -> CallerContext {
        let role = if self.is_moderator {
            CallerRole::Moderator
        } else {
            CallerRole::Submitter
        };
        CallerContext::new(self.id, role)
    }
}

impl Database {
    pub(super) async fn migrate_profiles(&self) -> StoreResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_profiles (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                is_moderator BOOLEAN NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create a profile, or update username and moderator flag for an existing email
    ///
    /// # Errors
    ///
    /// Returns an error if the write or the read-back fails
    pub async fn upsert_user_profile(
        &self,
        username: &str,
        email: &str,
        is_moderator: bool,
    ) -> StoreResult<UserAccount> {
        sqlx::query(
            r"
            INSERT INTO user_profiles (id, username, email, is_moderator, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT(email) DO UPDATE SET
                username = excluded.username,
                is_moderator = excluded.is_moderator
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(username)
        .bind(email)
        .bind(is_moderator)
        .bind(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
        .execute(&self.pool)
        .await?;

        self.get_user_profile_by_email(email)
            .await?
            .ok_or_else(|| StoreError::not_found("user profile", email))
    }

    /// Look up a profile by email
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn get_user_profile_by_email(&self, email: &str) -> StoreResult<Option<UserAccount>> {
        let row = sqlx::query(
            "SELECT id, username, email, is_moderator, created_at FROM user_profiles WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_account).transpose()
    }

    /// Look up a profile by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn get_user_profile(&self, id: Uuid) -> StoreResult<Option<UserAccount>> {
        let row = sqlx::query(
            "SELECT id, username, email, is_moderator, created_at FROM user_profiles WHERE id = $1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_account).transpose()
    }
}

fn row_to_account(row: &SqliteRow) -> StoreResult<UserAccount> {
    let id: String = row.try_get("id")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(UserAccount {
        id: Uuid::parse_str(&id)
            .map_err(|e| StoreError::invalid_data(format!("user profile id: {e}")))?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        is_moderator: row.try_get("is_moderator")?,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map(|at| at.with_timezone(&Utc))
            .map_err(|e| StoreError::invalid_data(format!("user profile created_at: {e}")))?,
    })
}

#[cfg(test)]
mod tests {
    use crate::database::tests::create_test_db;

    #[tokio::test]
    async fn test_upsert_keeps_id_and_updates_role() -> anyhow::Result<()> {
        let db = create_test_db().await?;

        let first = db.upsert_user_profile("ada", "ada@example.com", false).await?;
        let second = db.upsert_user_profile("ada_l", "ada@example.com", true).await?;

        assert_eq!(first.id, second.id);
        assert_eq!(second.username, "ada_l");
        assert!(second.caller_context().role.can_moderate());
        assert_eq!(db.get_user_profile(first.id).await?, Some(second));
        Ok(())
    }
}
