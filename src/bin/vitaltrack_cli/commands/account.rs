// ABOUTME: Account commands for vitaltrack-cli
// ABOUTME: Handles guide, feedback, session status, sign-in, and administrator calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

use std::fs;
use std::path::Path;

use tracing::info;
use vitaltrack::api::Feedback;
use vitaltrack::context::ClientContext;
use vitaltrack::errors::{AppError, AppResult};
use vitaltrack::session::SessionStatus;

use crate::helpers::display::print_json;

type Result<T> = AppResult<T>;

/// Print the personalized health guide
pub async fn guide(context: &ClientContext) -> Result<()> {
    print_json(&context.api().health_guide().await?)
}

/// Submit feedback
pub async fn feedback(context: &ClientContext, content: String, contact: Option<String>) -> Result<()> {
    context
        .api()
        .submit_feedback(&Feedback { content, contact })
        .await?;
    println!("Feedback sent, thank you");
    Ok(())
}

/// Report whether the configured credential is usable
pub fn status(context: &ClientContext) {
    match context.session().validate() {
        SessionStatus::SignedIn(role) => println!("Signed in ({role:?})"),
        SessionStatus::SignedOut => {
            println!("Signed out: no usable token (set VITALTRACK_TOKEN or pass --token)");
        }
    }
}

/// Sign in and print the token for reuse
pub async fn sign_in(context: &ClientContext, email: &str, password: &str) -> Result<()> {
    let credential = context.api().sign_in(email, password).await?;
    info!(role = ?credential.role(), "Signed in");
    println!("Role: {:?}", credential.role());
    println!("export VITALTRACK_TOKEN=\"{}\"", credential.token());
    Ok(())
}

/// List users with an administrator sign-in
pub async fn list_users(context: &ClientContext, email: &str, password: &str) -> Result<()> {
    context.api().sign_in(email, password).await?;
    print_json(&context.api().list_users().await?)
}

/// Upload a dataset file with an administrator sign-in
pub async fn upload(context: &ClientContext, file: &Path, email: &str, password: &str) -> Result<()> {
    let bytes = fs::read(file).map_err(|e| {
        AppError::invalid_input(format!("cannot read {}", file.display())).with_source(e)
    })?;
    let file_name = file
        .file_name()
        .map_or_else(|| "dataset".to_owned(), |n| n.to_string_lossy().into_owned());

    context.api().sign_in(email, password).await?;
    let response = context.api().upload_dataset(&file_name, bytes).await?;
    info!(file = %file_name, "Dataset uploaded");
    print_json(&response)
}
