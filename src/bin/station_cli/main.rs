// ABOUTME: Station CLI - operator tool for reviewing and moderating station submissions
// ABOUTME: Lists review queues, searches, records decisions, and manages moderator profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Register a moderator
//! station-cli user add --username ada --email ada@example.com --moderator
//!
//! # Submit a station for review
//! station-cli submit --name "Fountain Square" --lat 52.52 --lon 13.40 --as ada@example.com
//!
//! # Show the review queue, optionally narrowed by a local filter
//! station-cli pending --filter fountain
//!
//! # Approve or reject a submission
//! station-cli approve 1b4e28ba-2fa1-11d2-883f-0016d3cca427 --as ada@example.com
//! station-cli reject 1b4e28ba-2fa1-11d2-883f-0016d3cca427 --as ada@example.com
//!
//! # Search station names
//! station-cli search foun
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use station_moderation::{
    config::{DatabaseUrl, ModerationConfig},
    dashboard::ModerationDashboard,
    database_plugins::{factory::Database, StationStore},
    errors::AppResult,
    logging::LoggingConfig,
    models::{ModerationOutcome, StationId},
};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "station-cli",
    about = "Station moderation CLI",
    long_about = "Command-line tool for reviewing, searching, and moderating submitted stations."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List stations awaiting review
    Pending {
        /// Narrow the list with a local filter
        #[arg(long)]
        filter: Option<String>,
    },

    /// List verified stations
    Verified {
        /// Narrow the list with a local filter
        #[arg(long)]
        filter: Option<String>,
    },

    /// List reported stations
    Reported {
        /// Narrow the list with a local filter
        #[arg(long)]
        filter: Option<String>,
    },

    /// Search station names
    Search {
        /// Free text query
        query: String,
    },

    /// Approve a station
    Approve {
        /// Station ID
        id: StationId,

        /// Email of the acting moderator
        #[arg(long = "as")]
        acting_as: String,
    },

    /// Reject a station
    Reject {
        /// Station ID
        id: StationId,

        /// Email of the acting moderator
        #[arg(long = "as")]
        acting_as: String,
    },

    /// Submit a new station for review
    Submit {
        /// Station name
        #[arg(long)]
        name: String,

        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Free text description
        #[arg(long, default_value = "")]
        description: String,

        /// Nearby landmark
        #[arg(long)]
        landmark: Option<String>,

        /// Email of the submitting user
        #[arg(long = "as")]
        acting_as: String,
    },

    /// Flag a station for another review
    Report {
        /// Station ID
        id: StationId,
    },

    /// User profile management
    User {
        #[command(subcommand)]
        action: UserCommand,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    /// Create or update a user profile
    Add {
        /// Public handle
        #[arg(long)]
        username: String,

        /// Contact email, unique per user
        #[arg(long)]
        email: String,

        /// Allow this user to approve and reject stations
        #[arg(long)]
        moderator: bool,
    },
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    LoggingConfig::for_cli(cli.verbose).init()?;

    let mut config = ModerationConfig::from_env()?;
    if let Some(url) = &cli.database_url {
        config.database = DatabaseUrl::parse_url(url)?;
    }

    info!(database = %config.database, "Connecting to station database");
    let database = Arc::new(
        Database::new(&config.database.to_connection_string())
            .await?
            .with_search_limit(config.search.result_limit),
    );
    debug!(backend = database.backend_info(), "Record store ready");
    database.health_check().await?;

    let store: Arc<dyn StationStore> = database.clone();
    let dashboard = ModerationDashboard::new(store, &config).await?;

    match cli.command {
        Command::Pending { filter } => {
            commands::stations::pending(&dashboard, filter.as_deref()).await?;
        }
        Command::Verified { filter } => {
            commands::stations::verified(&dashboard, filter.as_deref()).await?;
        }
        Command::Reported { filter } => {
            commands::stations::reported(&dashboard, filter.as_deref()).await?;
        }
        Command::Search { query } => commands::stations::search(&dashboard, &query).await,
        Command::Approve { id, acting_as } => {
            let outcome = ModerationOutcome::Verified;
            commands::decide::run(&database, &dashboard, id, outcome, &acting_as).await?;
        }
        Command::Reject { id, acting_as } => {
            let outcome = ModerationOutcome::Rejected;
            commands::decide::run(&database, &dashboard, id, outcome, &acting_as).await?;
        }
        Command::Submit {
            name,
            lat,
            lon,
            description,
            landmark,
            acting_as,
        } => {
            let submission = commands::stations::Submission {
                name,
                latitude: lat,
                longitude: lon,
                description,
                landmark,
            };
            commands::stations::submit(&database, submission, &acting_as).await?;
        }
        Command::Report { id } => commands::stations::report(&database, id).await?,
        Command::User { action } => match action {
            UserCommand::Add {
                username,
                email,
                moderator,
            } => commands::user::add(&database, &username, &email, moderator).await?,
        },
    }

    Ok(())
}
