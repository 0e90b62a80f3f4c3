// ABOUTME: Repair pass for server bodies carrying non-finite numeric tokens
// ABOUTME: Rewrites bare NaN, Infinity, and -Infinity outside string literals to null
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalTrack Contributors

use std::borrow::Cow;

use serde_json::Value;
use tracing::debug;

const NON_FINITE_TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Replace bare non-finite tokens with `null`
///
/// String literals (including escaped quotes inside them) are copied through
/// untouched, as are identifiers that merely contain a token such as `NaNa`.
#[must_use]
pub fn repair_non_finite(body: &str) -> Cow<'_, str> {
    if !NON_FINITE_TOKENS.iter().any(|t| body.contains(t)) {
        return Cow::Borrowed(body);
    }

    let mut out = String::with_capacity(body.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut prev: Option<char> = None;
    let mut rest = body;

    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if !prev.is_some_and(is_word_char) {
            if let Some(token) = NON_FINITE_TOKENS.iter().find(|t| {
                rest.starts_with(**t) && !rest[t.len()..].chars().next().is_some_and(is_word_char)
            }) {
                out.push_str("null");
                rest = &rest[token.len()..];
                prev = Some('l');
                continue;
            }
        }

        out.push(c);
        prev = Some(c);
        rest = &rest[c.len_utf8()..];
    }

    Cow::Owned(out)
}

/// Parse strictly, falling back to the repaired body
///
/// # Errors
///
/// Returns the parse error of the repaired body when both passes fail
pub fn parse_lenient(body: &str) -> Result<Value, serde_json::Error> {
    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(strict) => {
            let repaired = repair_non_finite(body);
            if matches!(repaired, Cow::Borrowed(_)) {
                return Err(strict);
            }
            debug!(error = %strict, "Strict parse failed, retrying with repaired body");
            serde_json::from_str(&repaired)
        }
    }
}
