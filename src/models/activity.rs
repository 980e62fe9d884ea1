// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User activity log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{AppError, FieldError};

/// What the user did with a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ActivityType {
    View,
    Favorite,
    Share,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::View => "view",
            ActivityType::Favorite => "favorite",
            ActivityType::Share => "share",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "view" => Ok(ActivityType::View),
            "favorite" => Ok(ActivityType::Favorite),
            "share" => Ok(ActivityType::Share),
            other => Err(format!("Unknown activity type: {}", other)),
        }
    }
}

/// Append-only activity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Activity {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub quote_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

/// Request body for recording an activity.
///
/// Fields arrive as strings so bad values surface as validation errors
/// rather than body rejections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordActivityInput {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub quote_id: String,
}

impl RecordActivityInput {
    pub fn parse(&self) -> Result<(ActivityType, Uuid), AppError> {
        let mut errors = Vec::new();

        let kind = self
            .kind
            .parse::<ActivityType>()
            .map_err(|_| errors.push(field_error("type", "Type must be one of view, favorite, share")))
            .ok();
        let quote_id = Uuid::parse_str(self.quote_id.trim())
            .map_err(|_| errors.push(field_error("quoteId", "Quote ID must be a valid UUID")))
            .ok();

        match (kind, quote_id) {
            (Some(kind), Some(quote_id)) => Ok((kind, quote_id)),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

fn field_error(field: &str, message: &str) -> FieldError {
    FieldError {
        field: field.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_type_round_trips_lowercase() {
        assert_eq!("Share".parse::<ActivityType>(), Ok(ActivityType::Share));
        assert!("like".parse::<ActivityType>().is_err());
        assert_eq!(
            serde_json::to_value(ActivityType::Favorite).unwrap(),
            serde_json::json!("favorite")
        );
    }

    #[test]
    fn test_record_input_reports_every_bad_field() {
        let input = RecordActivityInput {
            kind: "like".to_string(),
            quote_id: "nope".to_string(),
        };

        match input.parse() {
            Err(AppError::Validation(errors)) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["type", "quoteId"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_record_input_accepts_valid_body() {
        let quote_id = Uuid::new_v4();
        let input = RecordActivityInput {
            kind: "view".to_string(),
            quote_id: quote_id.to_string(),
        };
        assert_eq!(input.parse().unwrap(), (ActivityType::View, quote_id));
    }
}
