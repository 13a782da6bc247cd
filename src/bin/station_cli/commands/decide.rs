// ABOUTME: Approve and reject commands for station-cli
// ABOUTME: Resolves the acting moderator by email and runs the decision through the dashboard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use station_moderation::{
    dashboard::ModerationDashboard,
    database_plugins::factory::Database,
    errors::{AppError, AppResult},
    models::{ModerationOutcome, StationId},
};
use tracing::warn;

use crate::helpers::display::{display_notice, display_station};

/// Record a decision as the user registered under `email`
pub async fn run(
    database: &Database,
    dashboard: &ModerationDashboard,
    id: StationId,
    outcome: ModerationOutcome,
    email: &str,
) -> AppResult<()> {
    let account = database
        .get_user_profile_by_email(email)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {email}")))?;
    let caller = account.caller_context();

    let report = dashboard.decide(&caller, id, outcome).await;
    display_notice(&report.notice);

    match report.result {
        Ok(record) => {
            display_station(&record);
            Ok(())
        }
        Err(e) if e.is_informational() => Ok(()),
        Err(e) => {
            warn!(station_id = %id, error = %e, "Decision failed");
            Err(e.into())
        }
    }
}
