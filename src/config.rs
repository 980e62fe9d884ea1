// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup and handed to the components that
//! need it through [`Config`]; nothing else in the crate touches `std::env`.

use std::env;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_JWT_EXPIRATION_DAYS: i64 = 30;
const MAX_JWT_EXPIRATION_DAYS: i64 = 365;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Web client origin allowed by CORS
    pub frontend_url: String,
    /// HMAC secret for session tokens (raw bytes)
    pub jwt_secret: Vec<u8>,
    /// Session token lifetime in days
    pub jwt_expiration_days: i64,
    /// Optional JSON file with quotes/users to load at startup
    pub seed_file: Option<String>,
}

impl Config {
    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            port: DEFAULT_PORT,
            frontend_url: "http://localhost:5173".to_string(),
            jwt_secret: b"test_jwt_secret_32_bytes_minimum".to_vec(),
            jwt_expiration_days: DEFAULT_JWT_EXPIRATION_DAYS,
            seed_file: None,
        }
    }

    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let jwt_expiration_days = match env::var("JWT_EXPIRATION_DAYS") {
            Ok(raw) => match raw.trim().parse::<i64>() {
                Ok(days) if days > MAX_JWT_EXPIRATION_DAYS => {
                    tracing::warn!(
                        requested = days,
                        max = MAX_JWT_EXPIRATION_DAYS,
                        "JWT_EXPIRATION_DAYS too large, clamping"
                    );
                    MAX_JWT_EXPIRATION_DAYS
                }
                Ok(days) if days > 0 => days,
                _ => return Err(ConfigError::Invalid("JWT_EXPIRATION_DAYS", raw)),
            },
            Err(_) => DEFAULT_JWT_EXPIRATION_DAYS,
        };

        let jwt_secret = env::var("JWT_SECRET")
            .map(|v| v.trim().to_string())
            .map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::Missing("JWT_SECRET"));
        }

        Ok(Self {
            port,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            jwt_secret: jwt_secret.into_bytes(),
            jwt_expiration_days,
            seed_file: env::var("SEED_FILE").ok().filter(|v| !v.trim().is_empty()),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
