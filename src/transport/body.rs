// ABOUTME: Request payloads accepted by the transport and query-string encoding
// ABOUTME: JSON bodies, rebuildable multipart forms, and GET parameter serialization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use url::Url;
use vitaltrack_core::{AppError, AppResult};

/// Payload of a transport call
///
/// For reads, a JSON object is encoded into the query string. For writes, a
/// JSON value is sent as the body and a multipart payload is sent as a form.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Structured payload or query parameters
    Json(Value),
    /// Multipart form; no content type is forced
    Multipart(MultipartPayload),
}

/// One field of a multipart form
#[derive(Debug, Clone)]
pub enum MultipartField {
    /// Plain text field
    Text {
        /// Field name
        name: String,
        /// Field value
        value: String,
    },
    /// File upload
    File {
        /// Field name
        name: String,
        /// File name reported to the server
        file_name: String,
        /// File contents
        bytes: Vec<u8>,
        /// MIME type, when known
        mime: Option<String>,
    },
}

/// Multipart form description that can be turned into a fresh form per attempt
#[derive(Debug, Clone, Default)]
pub struct MultipartPayload {
    fields: Vec<MultipartField>,
}

impl MultipartPayload {
    /// Empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(MultipartField::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Add a file field
    #[must_use]
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
        mime: Option<String>,
    ) -> Self {
        self.fields.push(MultipartField::File {
            name: name.into(),
            file_name: file_name.into(),
            bytes,
            mime,
        });
        self
    }

    /// Fields in insertion order
    #[must_use]
    pub fn fields(&self) -> &[MultipartField] {
        &self.fields
    }

    /// Build a `reqwest` form; forms are consumed by sending, so each attempt builds one
    ///
    /// # Errors
    ///
    /// Returns a validation error when a MIME type cannot be parsed
    pub fn to_form(&self) -> AppResult<Form> {
        self.fields.iter().try_fold(Form::new(), |form, field| {
            Ok(match field {
                MultipartField::Text { name, value } => form.text(name.clone(), value.clone()),
                MultipartField::File {
                    name,
                    file_name,
                    bytes,
                    mime,
                } => {
                    let mut part = Part::bytes(bytes.clone()).file_name(file_name.clone());
                    if let Some(mime) = mime {
                        part = part.mime_str(mime).map_err(|e| {
                            AppError::invalid_input(format!("invalid MIME type {mime}"))
                                .with_source(e)
                        })?;
                    }
                    form.part(name.clone(), part)
                }
            })
        })
    }
}

/// Append object parameters to `url` as query pairs
///
/// Scalars are written as-is, arrays and objects as a single JSON-encoded
/// value, and nulls are skipped.
///
/// # Errors
///
/// Returns a validation error when `params` is not a JSON object
pub fn append_query(url: &mut Url, params: &Value) -> AppResult<()> {
    let Value::Object(map) = params else {
        return Err(AppError::invalid_input(
            "query parameters must be a JSON object",
        ));
    };

    let mut pairs = url.query_pairs_mut();
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::String(s) => {
                pairs.append_pair(key, s);
            }
            Value::Bool(_) | Value::Number(_) => {
                pairs.append_pair(key, &value.to_string());
            }
            Value::Array(_) | Value::Object(_) => {
                pairs.append_pair(key, &serde_json::to_string(value)?);
            }
        }
    }
    drop(pairs);

    if url.query() == Some("") {
        url.set_query(None);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> Url {
        Url::parse("http://localhost/api/user/health-records").unwrap()
    }

    #[test]
    fn test_query_encodes_scalars_and_skips_null() {
        let mut url = base();
        append_query(&mut url, &json!({"dateRange": "week", "limit": 10, "cursor": null})).unwrap();
        assert_eq!(url.query(), Some("dateRange=week&limit=10"));
    }

    #[test]
    fn test_query_json_encodes_arrays() {
        let mut url = base();
        append_query(&mut url, &json!({"types": ["glucose", "weight"]})).unwrap();
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "types");
        assert_eq!(value, r#"["glucose","weight"]"#);
    }

    #[test]
    fn test_query_requires_object() {
        let mut url = base();
        assert!(append_query(&mut url, &json!([1, 2])).is_err());
        append_query(&mut url, &json!({"only": null})).unwrap();
        assert_eq!(url.query(), None);
    }
}
