// ABOUTME: Station listing, search, submission, and reporting commands for station-cli
// ABOUTME: Lists read through the dashboard view cache; submissions validate before insert
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use station_moderation::{
    dashboard::ModerationDashboard,
    database_plugins::factory::Database,
    errors::{AppError, AppResult},
    models::{GeoPoint, NewStation, StationId, StationRecord},
};
use tracing::info;

use crate::helpers::display::{display_station, display_stations};

/// Station fields collected from the command line
pub struct Submission {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub landmark: Option<String>,
}

fn narrow(stations: Vec<StationRecord>, filter: Option<&str>) -> Vec<StationRecord> {
    match filter {
        Some(query) => ModerationDashboard::filter(&stations, query),
        None => stations,
    }
}

/// List stations awaiting review
pub async fn pending(dashboard: &ModerationDashboard, filter: Option<&str>) -> AppResult<()> {
    let stations = narrow(dashboard.list_pending().await?, filter);
    display_stations("Pending review", &stations);
    Ok(())
}

/// List verified stations
pub async fn verified(dashboard: &ModerationDashboard, filter: Option<&str>) -> AppResult<()> {
    let stations = narrow(dashboard.list_verified().await?, filter);
    display_stations("Verified", &stations);
    Ok(())
}

/// List reported stations
pub async fn reported(dashboard: &ModerationDashboard, filter: Option<&str>) -> AppResult<()> {
    let stations = narrow(dashboard.list_reported().await?, filter);
    display_stations("Reported", &stations);
    Ok(())
}

/// Search station names
pub async fn search(dashboard: &ModerationDashboard, query: &str) {
    let results = dashboard.search(query).await;
    display_stations(&format!("Results for \"{query}\""), &results);
}

/// Submit a station on behalf of an existing user
pub async fn submit(database: &Database, submission: Submission, email: &str) -> AppResult<()> {
    let account = database
        .get_user_profile_by_email(email)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {email}")))?;

    let station = NewStation {
        name: submission.name,
        description: submission.description,
        landmark: submission.landmark,
        location: GeoPoint::new(submission.latitude, submission.longitude)?,
        added_by: account.id,
    };
    let record = database.insert_station(&station).await?;

    info!(station_id = %record.id, "Submitted station");
    println!("\nSuccess Station submitted for review");
    display_station(&record);
    Ok(())
}

/// Flag a station for another review
pub async fn report(database: &Database, id: StationId) -> AppResult<()> {
    database.report_station(id).await?;
    println!("\nSuccess Station {id} flagged for review");
    Ok(())
}
