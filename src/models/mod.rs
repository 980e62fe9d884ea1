// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod quote;
pub mod stats;
pub mod user;

pub use activity::{Activity, ActivityType, RecordActivityInput};
pub use quote::{NewQuote, Quote};
pub use stats::{StreakResult, UserStats};
pub use user::{NewUser, UpdateProfileInput, User};
