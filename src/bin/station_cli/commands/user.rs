// ABOUTME: User profile commands for station-cli
// ABOUTME: Creates or updates profiles and the moderator flag used for decisions

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use station_moderation::{
    database_plugins::factory::Database,
    errors::{AppError, AppResult},
};
use tracing::info;

use crate::helpers::display::display_user;

/// Create a profile or update the one registered under `email`
pub async fn add(
    database: &Database,
    username: &str,
    email: &str,
    moderator: bool,
) -> AppResult<()> {
    if username.trim().is_empty() || !email.contains('@') {
        return Err(AppError::invalid_input(
            "A username and a valid email are required",
        ));
    }

    let account = database
        .upsert_user_profile(username, email, moderator)
        .await?;
    info!(user_id = %account.id, moderator, "Saved user profile");
    display_user(&account);
    Ok(())
}
