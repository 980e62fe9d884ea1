// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Quotes API: motivational quotes, favorites and activity streaks
//!
//! This crate provides the backend API for the quotes web and desktop
//! clients: a filterable quote catalogue, per-user favorites, an activity
//! log, and streak statistics derived from it.

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod sanitize;
pub mod streak;
pub mod time_utils;

use config::Config;
use db::MemoryDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: MemoryDb,
}
