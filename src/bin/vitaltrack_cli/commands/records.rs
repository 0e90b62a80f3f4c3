// ABOUTME: Record commands for vitaltrack-cli
// ABOUTME: Handles list, add, update, delete, and metric summary operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

use tracing::info;
use vitaltrack::context::ClientContext;
use vitaltrack::errors::AppResult;
use vitaltrack::models::{HealthRecord, NewRecord, Period, RecordId, RecordPatch};

use crate::helpers::display::{print_json, print_records};

type Result<T> = AppResult<T>;

/// List records for the selected period
pub async fn list(context: &ClientContext, period: Option<Period>, refresh: bool) -> Result<()> {
    let records = load(context, period, refresh).await?;
    print_records(context.cache().current_period(), &records);
    Ok(())
}

/// Create a record and print it as stored locally
pub async fn add(context: &ClientContext, record: NewRecord) -> Result<()> {
    let created = context.records().add_record(record).await?;
    info!(record_id = %created.id, "Record added");
    print_json(&created)
}

/// Apply a partial update to a record
pub async fn update(context: &ClientContext, id: String, patch: RecordPatch) -> Result<()> {
    let id = RecordId::new(id);
    context.records().update_record(&id, &patch).await?;
    println!("Record {id} updated");
    Ok(())
}

/// Delete a record
pub async fn delete(context: &ClientContext, id: String) -> Result<()> {
    let id = RecordId::new(id);
    context.records().delete_record(&id).await?;
    println!("Record {id} deleted");
    Ok(())
}

/// Print every derived metric for the selected period
pub async fn summary(context: &ClientContext, period: Option<Period>) -> Result<()> {
    load(context, period, false).await?;
    print_json(&context.records().metrics())
}

async fn load(
    context: &ClientContext,
    period: Option<Period>,
    refresh: bool,
) -> Result<Vec<HealthRecord>> {
    match period {
        Some(period) if period != context.cache().current_period() => {
            context.records().set_period(period).await
        }
        _ => context.records().fetch_records(refresh).await,
    }
}
