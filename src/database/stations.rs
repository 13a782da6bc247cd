// ABOUTME: Station table operations: insert, point and filtered reads, conditional status writes
// ABOUTME: Every read joins the submitter profile so callers see one canonical record shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Database;
use crate::errors::{StoreError, StoreResult};
use crate::models::{GeoPoint, NewStation, StationId, StationRecord, StationStatus, UserProfile};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

/// Columns selected for every station read, joined with the submitter profile
const STATION_SELECT: &str = r"
    SELECT s.id, s.name, s.description, s.landmark, s.latitude, s.longitude,
           s.status, s.added_by, s.created_at, s.updated_at,
           p.username, p.email
    FROM stations s
    LEFT JOIN user_profiles p ON p.id = s.added_by
";

impl Database {
    /// Create the stations table and its indexes
    pub(super) async fn migrate_stations(&self) -> StoreResult<()> {
        // added_by is a weak reference: no foreign key, the join may miss
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS stations (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                name_folded TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT '',
                landmark TEXT,
                latitude REAL NOT NULL CHECK (latitude BETWEEN -90 AND 90),
                longitude REAL NOT NULL CHECK (longitude BETWEEN -180 AND 180),
                status TEXT NOT NULL DEFAULT 'unverified'
                    CHECK (status IN ('unverified', 'verified', 'rejected', 'reported')),
                added_by TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        self.add_folded_names().await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_stations_status ON stations(status)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_stations_created_at ON stations(created_at DESC)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Add and backfill `name_folded` on tables created before it existed
    async fn add_folded_names(&self) -> StoreResult<()> {
        let present: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM pragma_table_info('stations') WHERE name = 'name_folded'",
        )
        .fetch_one(&self.pool)
        .await?;
        if present == 0 {
            sqlx::query("ALTER TABLE stations ADD COLUMN name_folded TEXT NOT NULL DEFAULT ''")
                .execute(&self.pool)
                .await?;
        }

        let stale: Vec<(String, String)> =
            sqlx::query_as("SELECT id, name FROM stations WHERE name_folded = '' AND name <> ''")
                .fetch_all(&self.pool)
                .await?;
        for (id, name) in stale {
            sqlx::query("UPDATE stations SET name_folded = $1 WHERE id = $2")
                .bind(fold_name(&name))
                .bind(id)
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }

    /// Insert a new submission in the `unverified` state
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_station(&self, station: &NewStation) -> StoreResult<StationId> {
        let id = StationId::new();
        let now = encode_timestamp(Utc::now());

        sqlx::query(
            r"
            INSERT INTO stations (
                id, name, name_folded, description, landmark, latitude, longitude,
                status, added_by, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            ",
        )
        .bind(id.to_string())
        .bind(&station.name)
        .bind(fold_name(&station.name))
        .bind(&station.description)
        .bind(&station.landmark)
        .bind(station.location.latitude)
        .bind(station.location.longitude)
        .bind(StationStatus::Unverified.as_str())
        .bind(station.added_by.to_string())
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    /// Get a station by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn get_station(&self, id: StationId) -> StoreResult<Option<StationRecord>> {
        let row = sqlx::query(&format!("{STATION_SELECT} WHERE s.id = $1"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_station).transpose()
    }

    /// List stations in one status, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or any row cannot be decoded
    pub async fn list_stations_by_status(
        &self,
        status: StationStatus,
    ) -> StoreResult<Vec<StationRecord>> {
        let rows = sqlx::query(&format!(
            "{STATION_SELECT} WHERE s.status = $1 ORDER BY s.created_at DESC, s.id DESC"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_station).collect()
    }

    /// Case-insensitive substring search over station names
    ///
    /// Matches against the stored Unicode lowercase form of the name, since
    /// `LIKE` only folds ASCII letters.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or any row cannot be decoded
    pub async fn search_stations_by_name(
        &self,
        query: &str,
        limit: u32,
    ) -> StoreResult<Vec<StationRecord>> {
        let pattern = format!("%{}%", escape_like(&fold_name(query.trim())));
        let rows = sqlx::query(&format!(
            "{STATION_SELECT} WHERE s.name_folded LIKE $1 ESCAPE '\\' \
             ORDER BY s.created_at DESC, s.id DESC LIMIT $2"
        ))
        .bind(pattern)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_station).collect()
    }

    /// Compare-and-set the status of one station
    ///
    /// Returns the number of rows written: zero means the row is gone or its
    /// status no longer matches `expected`.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_station_status_if(
        &self,
        id: StationId,
        expected: StationStatus,
        status: StationStatus,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE stations
            SET status = $1, updated_at = $2
            WHERE id = $3 AND status = $4
            ",
        )
        .bind(status.as_str())
        .bind(encode_timestamp(updated_at))
        .bind(id.to_string())
        .bind(expected.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Move a station into any status without moderation checks
    ///
    /// Used by the reporting flow and by fixtures; moderation decisions go
    /// through the record store's conditional write instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn force_station_status(
        &self,
        id: StationId,
        status: StationStatus,
    ) -> StoreResult<u64> {
        let result = sqlx::query("UPDATE stations SET status = $1, updated_at = $2 WHERE id = $3")
            .bind(status.as_str())
            .bind(encode_timestamp(Utc::now()))
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Search key for a name; must agree with the local filter's folding
fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

/// Timestamps are stored as fixed-width RFC 3339 text so they sort lexically
fn encode_timestamp(at: DateTime<Utc>) -> String {
    at.trunc_subsecs(6)
        .to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(raw: &str, column: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| StoreError::invalid_data(format!("column '{column}': {e}")))
}

fn decode_uuid(raw: &str, column: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| StoreError::invalid_data(format!("column '{column}': {e}")))
}

/// Escape `LIKE` wildcards so user input matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn row_to_station(row: &SqliteRow) -> StoreResult<StationRecord> {
    let id: String = row.try_get("id")?;
    let status: String = row.try_get("status")?;
    let added_by: String = row.try_get("added_by")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(StationRecord {
        id: StationId(decode_uuid(&id, "id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        landmark: row.try_get("landmark")?,
        location: GeoPoint {
            latitude: row.try_get("latitude")?,
            longitude: row.try_get("longitude")?,
        },
        status: status
            .parse()
            .map_err(|_| StoreError::invalid_data(format!("unknown station status '{status}'")))?,
        added_by: decode_uuid(&added_by, "added_by")?,
        submitter: UserProfile::from_join(row.try_get("username")?, row.try_get("email")?),
        created_at: decode_timestamp(&created_at, "created_at")?,
        updated_at: decode_timestamp(&updated_at, "updated_at")?,
    })
}
