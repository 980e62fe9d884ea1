// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity streaks over UTC calendar days.
//!
//! A streak is a run of consecutive calendar days with at least one
//! activity. The current streak only survives while the latest active day
//! is today; once a full day passes without activity it drops to zero,
//! while the longest streak keeps the historical best.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::models::StreakResult;
use crate::time_utils::{format_calendar_date, parse_calendar_date, utc_today};

/// Compute streaks from `YYYY-MM-DD` dates, relative to `today`.
///
/// Duplicates count once; entries that are not calendar dates are ignored.
pub fn calculate_streak<I, S>(dates: I, today: NaiveDate) -> StreakResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let days: BTreeSet<NaiveDate> = dates
        .into_iter()
        .filter_map(|raw| {
            let raw = raw.as_ref();
            let parsed = parse_calendar_date(raw);
            if parsed.is_none() {
                tracing::debug!(date = raw, "Ignoring unparseable activity date");
            }
            parsed
        })
        .collect();

    let Some(&latest) = days.last() else {
        return StreakResult::default();
    };

    // Run lengths, most recent run first.
    let mut runs: Vec<u32> = Vec::new();
    let mut previous: Option<NaiveDate> = None;
    for &day in days.iter().rev() {
        match (previous, runs.last_mut()) {
            (Some(prev), Some(len)) if prev.signed_duration_since(day).num_days() == 1 => {
                *len += 1
            }
            _ => runs.push(1),
        }
        previous = Some(day);
    }

    let longest_streak = runs.iter().copied().max().unwrap_or(0);
    let current_streak = if latest == today { runs[0] } else { 0 };

    StreakResult {
        current_streak,
        longest_streak,
        last_active_date: Some(format_calendar_date(latest)),
    }
}

/// [`calculate_streak`] against the current UTC date.
pub fn calculate_streak_now<I, S>(dates: I) -> StreakResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    calculate_streak(dates, utc_today())
}
