// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! Failures are classified where they are detected into an [`ErrorReport`]
//! and rendered through [`format_error`], so every error body has one of
//! three shapes: validation, duplicate key, or a plain message.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Message used when a failure carries no usable description.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

const VALIDATION_MESSAGE: &str = "Validation Error";
const DUPLICATE_KEY_MESSAGE: &str = "Duplicate Key Error";

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Duplicate value for {field}")]
    DuplicateKey { field: String, value: Value },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Build a duplicate-key error for a unique field.
    pub fn duplicate(field: &str, value: impl Into<Value>) -> Self {
        AppError::DuplicateKey {
            field: field.to_string(),
            value: value.into(),
        }
    }

    /// HTTP status for this error category.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateKey { .. } => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Classify this error for the response formatter.
    pub fn report(&self) -> ErrorReport {
        match self {
            AppError::Validation(errors) => ErrorReport::Validation {
                errors: errors.clone(),
            },
            AppError::DuplicateKey { field, value } => ErrorReport::DuplicateKey {
                field: field.clone(),
                value: value.clone(),
            },
            // Internal details are logged, never returned.
            AppError::Internal(_) => ErrorReport::from("Internal server error"),
            other => ErrorReport::from(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let message = errs
                    .iter()
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("Invalid value for {}", wire_name(&field)));
                FieldError {
                    field: wire_name(&field),
                    message,
                }
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::Validation(fields)
    }
}

/// Request bodies are camelCase on the wire; validator reports Rust field names.
fn wire_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' && !out.is_empty() {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
            }
            AppError::Unauthorized | AppError::InvalidToken => {
                tracing::debug!(error = %self, "Rejected unauthenticated request");
            }
            _ => {
                tracing::info!(status = status.as_u16(), error = %self, "Request failed");
            }
        }

        (status, Json(format_error(self.report()))).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

// ─── Response Formatting ─────────────────────────────────────

/// One invalid field in a validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// A failure, classified by the layer that detected it.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorReport {
    /// Client-supplied data failed validation.
    Validation { errors: Vec<FieldError> },
    /// A uniqueness constraint was violated.
    DuplicateKey { field: String, value: Value },
    /// Anything else, described by a message.
    Generic { message: String },
}

impl From<&str> for ErrorReport {
    fn from(message: &str) -> Self {
        ErrorReport::Generic {
            message: message.to_string(),
        }
    }
}

impl From<String> for ErrorReport {
    fn from(message: String) -> Self {
        ErrorReport::Generic { message }
    }
}

impl From<ErrorResponse> for ErrorReport {
    fn from(response: ErrorResponse) -> Self {
        if let Some(errors) = response.errors {
            ErrorReport::Validation { errors }
        } else if let Some(field) = response.field {
            ErrorReport::DuplicateKey {
                field,
                value: response.value.unwrap_or(Value::Null),
            }
        } else {
            ErrorReport::Generic {
                message: response.message,
            }
        }
    }
}

/// JSON error response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "unknown"))]
    pub value: Option<Value>,
}

impl ErrorResponse {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
            field: None,
            value: None,
        }
    }
}

/// Render a classified failure as a response body.
pub fn format_error(report: impl Into<ErrorReport>) -> ErrorResponse {
    match report.into() {
        ErrorReport::Validation { errors } => ErrorResponse {
            errors: Some(errors),
            ..ErrorResponse::message(VALIDATION_MESSAGE)
        },
        ErrorReport::DuplicateKey { field, value } => ErrorResponse {
            field: Some(field),
            value: Some(value),
            ..ErrorResponse::message(DUPLICATE_KEY_MESSAGE)
        },
        ErrorReport::Generic { message } if message.trim().is_empty() => {
            ErrorResponse::message(UNKNOWN_ERROR_MESSAGE)
        }
        ErrorReport::Generic { message } => ErrorResponse::message(message),
    }
}
