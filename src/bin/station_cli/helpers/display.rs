// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for station-cli
// ABOUTME: Provides consistent display functions for station lists, notices, and profiles

use station_moderation::database::UserAccount;
use station_moderation::models::StationRecord;
use station_moderation::moderation::{Notice, NoticeLevel};

/// Display a titled station list
pub fn display_stations(title: &str, stations: &[StationRecord]) {
    println!("\n{title} ({})", stations.len());
    println!("{}", "=".repeat(80));
    if stations.is_empty() {
        println!("   (none)");
        return;
    }
    for station in stations {
        display_station(station);
    }
}

/// Display one station as a compact block
pub fn display_station(station: &StationRecord) {
    println!("{}  [{}]", station.name, station.status);
    println!("   ID: {}", station.id);
    println!("   Location: {}", station.location);
    if let Some(landmark) = &station.landmark {
        println!("   Landmark: {landmark}");
    }
    if !station.description.is_empty() {
        println!("   Description: {}", station.description);
    }
    println!(
        "   Submitted by: {} <{}> on {}",
        station.submitter.username,
        station.submitter.email,
        station.created_at.format("%Y-%m-%d %H:%M UTC")
    );
}

/// Display a decision notice
pub fn display_notice(notice: &Notice) {
    let marker = match notice.level {
        NoticeLevel::Success => "Success",
        NoticeLevel::Error => "Error",
        NoticeLevel::Info => "Info",
    };
    println!("\n{marker} {}", notice.message);
}

/// Display a stored user profile
pub fn display_user(account: &UserAccount) {
    let role = if account.is_moderator {
        "Moderator"
    } else {
        "Submitter"
    };
    println!("\nSuccess User profile saved");
    println!("{}", "=".repeat(50));
    println!("   ID: {}", account.id);
    println!("   Username: {}", account.username);
    println!("   Email: {}", account.email);
    println!("   Role: {role}");
}
