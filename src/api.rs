// ABOUTME: Typed bindings for the remote health-record service endpoints
// ABOUTME: Record CRUD, guidance, feedback, sign-in, and admin collaborator calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

//! Endpoint bindings over the [`Transport`]
//!
//! Response shapes vary between server versions, so decoding here is lenient:
//! list responses may be wrapped in `{records: [...]}` or be a bare array, and
//! creation responses may report the new id as `recordId`, `id`, or a nested
//! record.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};
use vitaltrack_core::constants::endpoints;
use vitaltrack_core::models::{HealthRecord, NewRecord, Period, RecordId, RecordPatch};
use vitaltrack_core::{AppError, AppResult};

use crate::cache::RecordSource;
use crate::session::{Credential, Role, Session};
use crate::transport::{Method, MultipartPayload, RequestBody, Transport};

/// Feedback submitted by the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    /// Feedback text
    pub content: String,
    /// Optional contact address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    #[serde(default)]
    user: Option<LoginUser>,
}

#[derive(Debug, Deserialize)]
struct LoginUser {
    #[serde(default)]
    role_id: Option<i64>,
}

/// Remote record service client
pub struct HealthApi {
    transport: Arc<Transport>,
}

impl HealthApi {
    /// Bind to a transport
    #[must_use]
    pub const fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Session the transport draws credentials from
    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        self.transport.session()
    }

    /// Records for `period`, in server order
    ///
    /// # Errors
    ///
    /// Propagates transport errors; a body that is neither a list nor a
    /// `records` wrapper yields an empty collection
    pub async fn list_records(&self, period: Period) -> AppResult<Vec<HealthRecord>> {
        let mut params = Map::new();
        params.insert(endpoints::PERIOD_PARAM.to_owned(), Value::from(period.as_str()));
        let body = self
            .transport
            .request(
                endpoints::HEALTH_RECORDS,
                Method::GET,
                Some(RequestBody::Json(Value::Object(params))),
            )
            .await?;
        decode_record_list(body)
    }

    /// Create a record and return the server-assigned id
    ///
    /// # Errors
    ///
    /// Propagates transport errors; a response without an id is malformed
    pub async fn create_record(&self, record: &NewRecord) -> AppResult<RecordId> {
        let body = self
            .transport
            .request(
                endpoints::HEALTH_RECORDS_ADD,
                Method::POST,
                Some(RequestBody::Json(serde_json::to_value(record)?)),
            )
            .await?;

        body.as_ref().and_then(extract_record_id).ok_or_else(|| {
            AppError::malformed_response(body.map(|b| b.to_string()).unwrap_or_default())
        })
    }

    /// Apply a partial update
    ///
    /// # Errors
    ///
    /// Propagates transport errors
    pub async fn update_record(&self, id: &RecordId, patch: &RecordPatch) -> AppResult<()> {
        self.transport
            .request(
                &record_path(id),
                Method::PUT,
                Some(RequestBody::Json(serde_json::to_value(patch)?)),
            )
            .await
            .map_err(|e| e.with_resource_id(id.as_str()))?;
        Ok(())
    }

    /// Delete a record
    ///
    /// # Errors
    ///
    /// Propagates transport errors
    pub async fn delete_record(&self, id: &RecordId) -> AppResult<()> {
        self.transport
            .request(&record_path(id), Method::DELETE, None)
            .await
            .map_err(|e| e.with_resource_id(id.as_str()))?;
        Ok(())
    }

    /// Personalized guidance document, passed through as returned
    ///
    /// # Errors
    ///
    /// Propagates transport errors
    pub async fn health_guide(&self) -> AppResult<Value> {
        Ok(self
            .transport
            .request(endpoints::HEALTH_GUIDE, Method::GET, None)
            .await?
            .unwrap_or(Value::Null))
    }

    /// Submit feedback
    ///
    /// # Errors
    ///
    /// Returns a validation error for empty content, otherwise propagates
    /// transport errors
    pub async fn submit_feedback(&self, feedback: &Feedback) -> AppResult<Value> {
        if feedback.content.trim().is_empty() {
            return Err(AppError::invalid_input("feedback content is empty"));
        }
        Ok(self
            .transport
            .request(
                endpoints::FEEDBACK,
                Method::POST,
                Some(RequestBody::Json(serde_json::to_value(feedback)?)),
            )
            .await?
            .unwrap_or(Value::Null))
    }

    /// Exchange email and password for a credential and install it in the session
    ///
    /// # Errors
    ///
    /// Propagates transport errors; a response without a token is malformed
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<Credential> {
        let body = self
            .transport
            .request(
                endpoints::LOGIN,
                Method::POST,
                Some(RequestBody::Json(
                    json!({ "email": email, "password": password }),
                )),
            )
            .await?
            .ok_or_else(|| AppError::malformed_response(""))?;

        let login: LoginResponse = serde_json::from_value(body)?;
        let role = login
            .user
            .and_then(|u| u.role_id)
            .map_or(Role::User, Role::from_role_id);

        self.session().sign_in(login.token.clone(), role);
        Ok(Credential::new(login.token, role))
    }

    /// Administrator user listing
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when signed out and a permission error for a
    /// non-administrator session, otherwise propagates transport errors
    pub async fn list_users(&self) -> AppResult<Value> {
        self.require_admin()?;
        Ok(self
            .transport
            .request(endpoints::ADMIN_USERS, Method::GET, None)
            .await?
            .unwrap_or(Value::Null))
    }

    /// Administrator dataset upload as a multipart `file` field
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when signed out and a permission error for a
    /// non-administrator session, otherwise propagates transport errors
    pub async fn upload_dataset(&self, file_name: &str, bytes: Vec<u8>) -> AppResult<Value> {
        self.require_admin()?;
        let form = MultipartPayload::new().file("file", file_name, bytes, None);
        Ok(self
            .transport
            .request(
                endpoints::ADMIN_UPLOAD,
                Method::POST,
                Some(RequestBody::Multipart(form)),
            )
            .await?
            .unwrap_or(Value::Null))
    }

    fn require_admin(&self) -> AppResult<()> {
        match self.session().current_credential() {
            None => Err(AppError::auth_required()),
            Some(credential) if credential.role() != Role::Admin => {
                Err(AppError::permission_denied("administrator role required"))
            }
            Some(_) => Ok(()),
        }
    }
}

#[async_trait]
impl RecordSource for HealthApi {
    async fn fetch_records(&self, period: Period) -> AppResult<Vec<HealthRecord>> {
        self.list_records(period).await
    }
}

fn record_path(id: &RecordId) -> String {
    format!(
        "{}/{}",
        endpoints::HEALTH_RECORDS,
        urlencoding::encode(id.as_str())
    )
}

fn decode_record_list(body: Option<Value>) -> AppResult<Vec<HealthRecord>> {
    let items = match body {
        Some(Value::Array(items)) => items,
        Some(Value::Object(mut wrapper)) => match wrapper.remove("records") {
            Some(Value::Array(items)) => items,
            _ => {
                debug!("Record list response has no records array");
                Vec::new()
            }
        },
        _ => Vec::new(),
    };

    let total = items.len();
    let records: Vec<HealthRecord> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "Skipping undecodable record");
                None
            }
        })
        .collect();

    if records.len() != total {
        warn!(kept = records.len(), total, "Some records could not be decoded");
    }
    Ok(records)
}

fn extract_record_id(body: &Value) -> Option<RecordId> {
    ["recordId", "id"]
        .iter()
        .find_map(|key| body.get(*key))
        .or_else(|| body.get("record").and_then(|r| r.get("id")))
        .and_then(|id| match id {
            Value::String(s) if !s.is_empty() => Some(RecordId::new(s.clone())),
            Value::Number(n) => Some(RecordId::new(n.to_string())),
            _ => None,
        })
}
