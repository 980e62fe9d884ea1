// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Startup seed data loaded from a JSON file.
//!
//! ```json
//! { "quotes": [{ "text": "...", "author": "...", "tags": ["..."] }],
//!   "users":  [{ "email": "...", "password": "<hash>", "displayName": "..." }] }
//! ```

use serde::Deserialize;
use std::path::Path;
use validator::Validate;

use crate::db::MemoryDb;
use crate::error::AppError;
use crate::models::{NewQuote, NewUser};

#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub quotes: Vec<NewQuote>,
    #[serde(default)]
    pub users: Vec<NewUser>,
}

/// What a seed run actually inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub quotes: usize,
    pub users: usize,
    pub skipped: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid seed file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Read and apply a seed file.
pub fn load_seed_file(db: &MemoryDb, path: impl AsRef<Path>) -> Result<SeedSummary, SeedError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let content = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: display.clone(),
        source,
    })?;
    let data: SeedData = serde_json::from_str(&content).map_err(|source| SeedError::Parse {
        path: display,
        source,
    })?;

    Ok(apply_seed(db, data))
}

/// Insert seed records, skipping any that are invalid or already present.
pub fn apply_seed(db: &MemoryDb, data: SeedData) -> SeedSummary {
    let mut summary = SeedSummary::default();

    for quote in data.quotes {
        let quote = quote.normalized();
        let result = quote
            .validate()
            .map_err(AppError::from)
            .and_then(|_| db.insert_quote(quote));
        match result {
            Ok(_) => summary.quotes += 1,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping seed quote");
                summary.skipped += 1;
            }
        }
    }

    for user in data.users {
        match db.insert_user(user) {
            Ok(_) => summary.users += 1,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping seed user");
                summary.skipped += 1;
            }
        }
    }

    tracing::info!(
        quotes = summary.quotes,
        users = summary.users,
        skipped = summary.skipped,
        "Seed data applied"
    );
    summary
}
