// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.
//!
//! Calendar days are always UTC days.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Wire format for calendar dates.
pub const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// The UTC calendar day a timestamp falls on, as `YYYY-MM-DD`.
pub fn calendar_day(timestamp: DateTime<Utc>) -> String {
    format_calendar_date(timestamp.date_naive())
}

pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(CALENDAR_DATE_FORMAT).to_string()
}

pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), CALENDAR_DATE_FORMAT).ok()
}

/// Today's UTC calendar date.
pub fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}
