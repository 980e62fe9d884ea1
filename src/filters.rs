// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed query filters built from raw HTTP query parameters.
//!
//! Query strings only carry text, so each value is converted by shape:
//! numbers, booleans, ISO dates, comma-separated lists, and `field[op]`
//! range operators. Anything unrecognised stays a string; parsing never
//! fails. The resulting [`FilterSet`] serializes to Mongo-style JSON and
//! can be evaluated against JSON documents by the in-memory store.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::LazyLock;

use crate::time_utils::format_utc_rfc3339;

static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("valid number pattern"));

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}(T\d{2}:\d{2}(:\d{2}(\.\d+)?)?(Z|[+-]\d{2}:?\d{2})?)?$")
        .expect("valid date pattern")
});

static OPERATOR_KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^\[\]]+)\[(gte|lte|gt|lt)\]$").expect("valid operator key pattern")
});

/// Comparison operator accepted in `field[op]` keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RangeOp {
    Gte,
    Lte,
    Gt,
    Lt,
}

impl RangeOp {
    fn parse(op: &str) -> Option<Self> {
        match op {
            "gte" => Some(RangeOp::Gte),
            "lte" => Some(RangeOp::Lte),
            "gt" => Some(RangeOp::Gt),
            "lt" => Some(RangeOp::Lt),
            _ => None,
        }
    }

    /// Mongo-style operator name, e.g. `$gte`.
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeOp::Gte => "$gte",
            RangeOp::Lte => "$lte",
            RangeOp::Gt => "$gt",
            RangeOp::Lt => "$lt",
        }
    }

    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            RangeOp::Gte => ordering != Ordering::Less,
            RangeOp::Lte => ordering != Ordering::Greater,
            RangeOp::Gt => ordering == Ordering::Greater,
            RangeOp::Lt => ordering == Ordering::Less,
        }
    }
}

/// A single converted query value.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Number(f64),
    Bool(bool),
    Date(DateTime<Utc>),
    List(Vec<String>),
    Text(String),
    /// Accumulated `field[op]` bounds, in the order they were given.
    Range(Vec<(RangeOp, FilterValue)>),
}

impl FilterValue {
    /// Convert one raw value by shape.
    pub fn convert(raw: &str) -> Self {
        if NUMBER_PATTERN.is_match(raw) {
            if let Ok(n) = raw.parse::<f64>() {
                return FilterValue::Number(n);
            }
        }

        if raw.eq_ignore_ascii_case("true") {
            return FilterValue::Bool(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return FilterValue::Bool(false);
        }

        if DATE_PATTERN.is_match(raw) {
            if let Some(date) = parse_iso_date(raw) {
                return FilterValue::Date(date);
            }
        }

        if raw.contains(',') {
            return FilterValue::List(raw.split(',').map(|s| s.trim().to_string()).collect());
        }

        FilterValue::Text(raw.to_string())
    }

    /// Whether a document field satisfies this condition.
    ///
    /// Array fields match when any element matches.
    pub fn matches(&self, field: Option<&Value>) -> bool {
        match field {
            None | Some(Value::Null) => false,
            Some(Value::Array(items)) => items.iter().any(|item| self.matches_scalar(item)),
            Some(value) => self.matches_scalar(value),
        }
    }

    fn matches_scalar(&self, value: &Value) -> bool {
        match (self, value) {
            // String fields are compared in the query's own text form.
            (FilterValue::Number(_) | FilterValue::Bool(_), Value::String(s)) => {
                FilterValue::convert(s) == *self
            }
            (FilterValue::Number(n), _) => value.as_f64() == Some(*n),
            (FilterValue::Bool(b), _) => value.as_bool() == Some(*b),
            (FilterValue::Date(d), _) => value_as_date(value) == Some(*d),
            (FilterValue::Text(s), _) => value.as_str() == Some(s.as_str()),
            (FilterValue::List(items), _) => items
                .iter()
                .any(|item| FilterValue::convert(item).matches_scalar(value)),
            (FilterValue::Range(bounds), _) => bounds.iter().all(|(op, bound)| {
                compare(value, bound).is_some_and(|ordering| op.accepts(ordering))
            }),
        }
    }
}

impl Serialize for FilterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FilterValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            FilterValue::Bool(b) => serializer.serialize_bool(*b),
            FilterValue::Date(d) => serializer.serialize_str(&format_utc_rfc3339(*d)),
            FilterValue::List(items) => items.serialize(serializer),
            FilterValue::Text(s) => serializer.serialize_str(s),
            FilterValue::Range(bounds) => {
                let mut map = serializer.serialize_map(Some(bounds.len()))?;
                for (op, bound) in bounds {
                    map.serialize_entry(op.as_str(), bound)?;
                }
                map.end()
            }
        }
    }
}

/// Typed filters for a store query, keyed by field name in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    entries: Vec<(String, FilterValue)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Set a field, keeping its original position if it was already present.
    pub fn insert(&mut self, field: &str, value: FilterValue) {
        match self.entries.iter_mut().find(|(name, _)| name == field) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((field.to_string(), value)),
        }
    }

    /// Add one bound to a field's range, replacing any scalar already there.
    fn insert_bound(&mut self, field: &str, op: RangeOp, bound: FilterValue) {
        if let Some((_, FilterValue::Range(bounds))) =
            self.entries.iter_mut().find(|(name, _)| name == field)
        {
            match bounds.iter_mut().find(|(existing, _)| *existing == op) {
                Some((_, value)) => *value = bound,
                None => bounds.push((op, bound)),
            }
            return;
        }
        self.insert(field, FilterValue::Range(vec![(op, bound)]));
    }

    /// Whether a JSON document satisfies every filter (dotted paths allowed).
    pub fn matches(&self, document: &Value) -> bool {
        self.entries
            .iter()
            .all(|(field, condition)| condition.matches(lookup(document, field)))
    }
}

impl Serialize for FilterSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

/// Build a [`FilterSet`] from raw query parameters, in input order.
pub fn parse_filters<I, K, V>(params: I) -> FilterSet
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut filters = FilterSet::new();

    for (key, value) in params {
        let (key, value) = (key.as_ref(), value.as_ref());
        if value.is_empty() {
            continue;
        }

        let operator = OPERATOR_KEY_PATTERN.captures(key).and_then(|caps| {
            let field = caps.get(1)?.as_str();
            let op = RangeOp::parse(caps.get(2)?.as_str())?;
            Some((field, op))
        });

        match operator {
            Some((field, op)) => filters.insert_bound(field, op, FilterValue::convert(value)),
            None => filters.insert(key, FilterValue::convert(value)),
        }
    }

    filters
}

fn parse_iso_date(raw: &str) -> Option<DateTime<Utc>> {
    if raw.len() == 10 {
        return NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }

    // No offset (or a bare `Z` without seconds) means UTC.
    let naive = raw.strip_suffix('Z').unwrap_or(raw);
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
        .map(|dt| dt.and_utc())
}

fn value_as_date(value: &Value) -> Option<DateTime<Utc>> {
    value
        .as_str()
        .filter(|s| DATE_PATTERN.is_match(s))
        .and_then(parse_iso_date)
}

fn compare(value: &Value, bound: &FilterValue) -> Option<Ordering> {
    match bound {
        FilterValue::Number(n) => value.as_f64()?.partial_cmp(n),
        FilterValue::Date(d) => Some(value_as_date(value)?.cmp(d)),
        FilterValue::Text(s) => Some(value.as_str()?.cmp(s.as_str())),
        _ => None,
    }
}

fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(document, |current, segment| current.get(segment))
}
