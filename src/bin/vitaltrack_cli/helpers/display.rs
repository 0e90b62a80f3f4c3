// ABOUTME: Output formatting helpers for vitaltrack-cli
// ABOUTME: Prints record tables and pretty JSON on stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

use serde::Serialize;
use vitaltrack::errors::AppResult;
use vitaltrack::models::{HealthRecord, Period};

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print records as an aligned table, newest first as held locally
pub fn print_records(period: Period, records: &[HealthRecord]) {
    println!("{} record(s) for period '{period}'", records.len());
    if records.is_empty() {
        return;
    }
    println!("{}", "=".repeat(72));
    println!(
        "{:<10} {:<10} {:<8} {:>8} {:>8} {:>9}  Note",
        "ID", "Date", "Time", "Glucose", "Weight", "BP"
    );
    for record in records {
        println!(
            "{:<10} {:<10} {:<8} {:>8} {:>8} {:>9}  {}",
            record.id,
            record.date,
            record
                .time
                .map_or_else(String::new, |t| t.format("%H:%M").to_string()),
            optional(record.glucose_value()),
            optional(record.weight_value()),
            record.blood_pressure_text().unwrap_or("-"),
            record.note,
        );
    }
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| format!("{v:.1}"))
}
