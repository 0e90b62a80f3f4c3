// ABOUTME: Bearer token inspection for expiry and structural validity
// ABOUTME: Decodes the unsigned payload segment only; signatures are the server's concern
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;
use vitaltrack_core::constants::session::TOKEN_SEGMENTS;

/// Outcome of inspecting a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// Well formed and not past its expiry
    Valid,
    /// Payload `exp` is earlier than now
    Expired,
    /// Wrong segment count or undecodable payload
    Malformed,
}

/// Classify `token` against `now` (seconds since the Unix epoch)
///
/// A payload without an `exp` claim never expires.
#[must_use]
pub fn inspect(token: &str, now: i64) -> TokenState {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != TOKEN_SEGMENTS || segments.iter().any(|s| s.is_empty()) {
        return TokenState::Malformed;
    }

    let Some(payload) = decode_payload(segments[1]) else {
        return TokenState::Malformed;
    };

    match payload.get("exp").and_then(Value::as_f64) {
        Some(exp) if exp < now as f64 => TokenState::Expired,
        _ => TokenState::Valid,
    }
}

fn decode_payload(segment: &str) -> Option<Value> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .ok()?;
    let value: Value = serde_json::from_slice(&bytes).ok()?;
    value.is_object().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn token_with(payload: &Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{header}.{body}.signature")
    }

    #[test]
    fn test_valid_and_expired() {
        let now = 1_700_000_000;
        assert_eq!(inspect(&token_with(&json!({ "exp": now + 60 })), now), TokenState::Valid);
        assert_eq!(inspect(&token_with(&json!({ "exp": now - 1 })), now), TokenState::Expired);
        assert_eq!(inspect(&token_with(&json!({ "sub": "u1" })), now), TokenState::Valid);
    }

    #[test]
    fn test_malformed_shapes() {
        assert_eq!(inspect("opaque-token", 0), TokenState::Malformed);
        assert_eq!(inspect("a.b", 0), TokenState::Malformed);
        assert_eq!(inspect("a..c", 0), TokenState::Malformed);
        assert_eq!(inspect("a.!!!.c", 0), TokenState::Malformed);
        let not_object = URL_SAFE_NO_PAD.encode("[1,2]");
        assert_eq!(inspect(&format!("h.{not_object}.s"), 0), TokenState::Malformed);
    }
}
