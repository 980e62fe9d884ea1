// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stripping of sensitive fields from user records before they leave the API.

use serde_json::{Map, Value};

/// Keys that must never appear in a client-facing user record.
pub const SENSITIVE_USER_FIELDS: &[&str] = &["password", "__v"];

/// Copy of `record` without the password hash or the internal version counter.
///
/// Every other field, nested objects included, is carried over unchanged.
pub fn sanitize_user(record: &Map<String, Value>) -> Map<String, Value> {
    record
        .iter()
        .filter(|(key, _)| !SENSITIVE_USER_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
