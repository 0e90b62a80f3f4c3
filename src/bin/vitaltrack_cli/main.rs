// ABOUTME: VitalTrack CLI - command-line client for the health-record service
// ABOUTME: Lists, adds, updates, and deletes records and prints derived health metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors
//!
//! Usage:
//! ```bash
//! # List this month's records
//! vitaltrack-cli records list --period month
//!
//! # Add a reading
//! vitaltrack-cli records add --glucose 5.6 --weight 70.2 --bp 120/80
//!
//! # Correct a reading
//! vitaltrack-cli records update 42 --glucose 5.8
//!
//! # Averages, statuses, forecast, and score as JSON
//! vitaltrack-cli summary --period quarter
//!
//! # Obtain a token to export as VITALTRACK_TOKEN
//! vitaltrack-cli session sign-in --email user@example.com --password secret
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use vitaltrack::config::ClientConfig;
use vitaltrack::context::ClientContext;
use vitaltrack::errors::AppResult;
use vitaltrack::logging::LoggingConfig;
use vitaltrack::models::{NewRecord, Period, RecordPatch};

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "vitaltrack-cli",
    about = "VitalTrack health-record client",
    long_about = "Command-line client for recording glucose, weight, and blood pressure readings and reviewing derived health metrics."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Bearer token override (defaults to VITALTRACK_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Health record commands
    Records {
        #[command(subcommand)]
        action: RecordsCommand,
    },

    /// Print derived metrics for a period as JSON
    Summary {
        /// Reporting period (day, week, month, quarter, year, all)
        #[arg(long)]
        period: Option<Period>,
    },

    /// Print the personalized health guide
    Guide,

    /// Send feedback
    Feedback {
        /// Feedback text
        content: String,

        /// Contact address for a reply
        #[arg(long)]
        contact: Option<String>,
    },

    /// Session commands
    Session {
        #[command(subcommand)]
        action: SessionCommand,
    },

    /// Administrator commands
    Admin {
        #[command(subcommand)]
        action: AdminCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum RecordsCommand {
    /// List records for a period
    List {
        /// Reporting period (day, week, month, quarter, year, all)
        #[arg(long)]
        period: Option<Period>,

        /// Bypass the cache
        #[arg(long)]
        refresh: bool,
    },

    /// Add a record
    Add {
        /// Measurement day (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Measurement time (HH:MM:SS)
        #[arg(long)]
        time: Option<NaiveTime>,

        /// Measurement context, e.g. "fasting"
        #[arg(long)]
        measure_type: Option<String>,

        /// Blood glucose in mmol/L
        #[arg(long)]
        glucose: Option<f64>,

        /// Body weight in kg
        #[arg(long)]
        weight: Option<f64>,

        /// Blood pressure as systolic/diastolic
        #[arg(long)]
        bp: Option<String>,

        /// Free-form note
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Update fields of an existing record
    Update {
        /// Record ID
        id: String,

        /// New measurement day
        #[arg(long)]
        date: Option<NaiveDate>,

        /// New measurement time
        #[arg(long)]
        time: Option<NaiveTime>,

        /// New measurement context
        #[arg(long)]
        measure_type: Option<String>,

        /// New glucose value
        #[arg(long)]
        glucose: Option<f64>,

        /// New weight value
        #[arg(long)]
        weight: Option<f64>,

        /// New blood pressure
        #[arg(long)]
        bp: Option<String>,

        /// New note
        #[arg(long)]
        note: Option<String>,
    },

    /// Delete a record
    Delete {
        /// Record ID
        id: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum SessionCommand {
    /// Show whether the configured token is usable
    Status,

    /// Sign in and print the issued token
    SignIn {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum AdminCommand {
    /// List registered users
    Users {
        /// Administrator email
        #[arg(long)]
        email: String,

        /// Administrator password
        #[arg(long)]
        password: String,
    },

    /// Upload a dataset file
    Upload {
        /// File to upload
        file: PathBuf,

        /// Administrator email
        #[arg(long)]
        email: String,

        /// Administrator password
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose { logging.verbose() } else { logging };
    logging.init()?;

    let mut config = ClientConfig::from_env()?;
    if let Some(token) = cli.token {
        config.token = Some(token);
    }
    let context = ClientContext::from_config(config)?;

    match cli.command {
        Command::Records { action } => match action {
            RecordsCommand::List { period, refresh } => {
                commands::records::list(&context, period, refresh).await?;
            }
            RecordsCommand::Add {
                date,
                time,
                measure_type,
                glucose,
                weight,
                bp,
                note,
            } => {
                let record = NewRecord {
                    date,
                    time,
                    measure_type,
                    glucose,
                    weight,
                    blood_pressure: bp,
                    note,
                };
                commands::records::add(&context, record).await?;
            }
            RecordsCommand::Update {
                id,
                date,
                time,
                measure_type,
                glucose,
                weight,
                bp,
                note,
            } => {
                let patch = RecordPatch {
                    date,
                    time,
                    measure_type,
                    glucose,
                    weight,
                    blood_pressure: bp,
                    note,
                };
                commands::records::update(&context, id, patch).await?;
            }
            RecordsCommand::Delete { id } => {
                commands::records::delete(&context, id).await?;
            }
        },
        Command::Summary { period } => {
            commands::records::summary(&context, period).await?;
        }
        Command::Guide => commands::account::guide(&context).await?,
        Command::Feedback { content, contact } => {
            commands::account::feedback(&context, content, contact).await?;
        }
        Command::Session { action } => match action {
            SessionCommand::Status => commands::account::status(&context),
            SessionCommand::SignIn { email, password } => {
                commands::account::sign_in(&context, &email, &password).await?;
            }
        },
        Command::Admin { action } => match action {
            AdminCommand::Users { email, password } => {
                commands::account::list_users(&context, &email, &password).await?;
            }
            AdminCommand::Upload {
                file,
                email,
                password,
            } => {
                commands::account::upload(&context, &file, &email, &password).await?;
            }
        },
    }

    Ok(())
}
