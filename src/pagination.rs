// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page-based slicing of in-memory result lists.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

/// Requested page, 1-indexed. Both fields are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Non-positive values fall back to the defaults.
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: positive(page).unwrap_or(DEFAULT_PAGE),
            limit: positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Coerce raw query-string values; anything unusable falls back to the defaults.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: page.and_then(coerce).unwrap_or(DEFAULT_PAGE),
            limit: limit.and_then(coerce).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Clamp the page size.
    pub fn capped(self, max_limit: usize) -> Self {
        Self {
            limit: self.limit.min(max_limit.max(1)),
            ..self
        }
    }
}

/// Page metadata returned alongside the items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PageInfo {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub pages: usize,
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}

impl<T> Paginated<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Slice `items` down to the requested page.
///
/// Pages past the end yield no items but still report the full metadata.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Paginated<T> {
    let PageRequest { page, limit } = request;
    let total = items.len();
    let pages = total.div_ceil(limit);

    let items = match (page - 1).checked_mul(limit) {
        Some(start) if start < total => items.into_iter().skip(start).take(limit).collect(),
        _ => Vec::new(),
    };

    Paginated {
        items,
        pagination: PageInfo {
            total,
            page,
            limit,
            pages,
        },
    }
}

fn positive(value: i64) -> Option<usize> {
    usize::try_from(value).ok().filter(|v| *v >= 1)
}

fn coerce(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    match raw.parse::<i64>() {
        Ok(value) => positive(value),
        Err(_) => raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 1.0 && *v < i64::MAX as f64)
            .and_then(|v| positive(v.trunc() as i64)),
    }
}
