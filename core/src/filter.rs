//! Filter criteria shared by every list view.
//!
//! Each view's criteria struct is a tuple of the building blocks below.
//! Every block is inactive by default, and an inactive block matches
//! everything. Active blocks combine with logical AND.

use crate::types::Timestamp;
use chrono::Duration;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// A view's full filter tuple, evaluated against one record at a time.
pub trait Criteria<R>: Clone + PartialEq {
    fn matches(&self, record: &R) -> bool;
}

/// Records that take part in free-text search expose the fields the text
/// query is matched against.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

/// Pure derivation: the subsequence of `collection` accepted by `criteria`,
/// in original collection order.
pub fn apply_filters<R: Clone, C: Criteria<R>>(collection: &[R], criteria: &C) -> Vec<R> {
    collection
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

// ── Free text ──────────────────────────────────────────────────────

/// Case-insensitive substring query. Empty means inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextQuery(pub String);

impl TextQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn is_active(&self) -> bool {
        !self.0.is_empty()
    }

    /// True when any of `fields` contains the query, ignoring case.
    pub fn matches_any(&self, fields: &[&str]) -> bool {
        if !self.is_active() {
            return true;
        }
        let needle = self.0.to_lowercase();
        fields.iter().any(|f| f.to_lowercase().contains(&needle))
    }

    pub fn matches<R: Searchable>(&self, record: &R) -> bool {
        self.matches_any(&record.search_fields())
    }
}

impl From<&str> for TextQuery {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

// ── Categorical selector ───────────────────────────────────────────

/// A select widget: either `All` or exactly one value.
///
/// On the wire it is the plain label, with `"All"` meaning inactive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Choice::All
    }
}

impl<T: PartialEq> Choice<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => wanted == value,
        }
    }
}

impl<T: fmt::Display> Serialize for Choice<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Choice::All => serializer.serialize_str("All"),
            Choice::Only(value) => serializer.collect_str(value),
        }
    }
}

impl<'de, T> Deserialize<'de> for Choice<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == "All" {
            return Ok(Choice::All);
        }
        raw.parse().map(Choice::Only).map_err(de::Error::custom)
    }
}

// ── Date range ─────────────────────────────────────────────────────

/// Inclusive `[from, to]` range compared as instants.
///
/// A range only filters once both ends are picked; with either end missing
/// it admits everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRange {
    pub from: Option<Timestamp>,
    pub to:   Option<Timestamp>,
}

impl DateRange {
    pub fn new(from: Timestamp, to: Timestamp) -> Self {
        Self {
            from: Some(from),
            to:   Some(to),
        }
    }

    /// The range the list views start with: the last `days` days up to `now`.
    /// A window reaching past the representable calendar leaves `from` open.
    pub fn trailing_days(now: Timestamp, days: i64) -> Self {
        Self {
            from: Duration::try_days(days).and_then(|d| now.checked_sub_signed(d)),
            to:   Some(now),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    pub fn contains(&self, at: Timestamp) -> bool {
        match (self.from, self.to) {
            (Some(from), Some(to)) => from <= at && at <= to,
            _ => true,
        }
    }

    /// An absent range admits every timestamp.
    pub fn admits(range: &Option<DateRange>, at: Timestamp) -> bool {
        range.map_or(true, |r| r.contains(at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn empty_query_matches_everything() {
        assert!(TextQuery::default().matches_any(&[]));
        assert!(TextQuery::default().matches_any(&["anything"]));
    }

    #[test]
    fn query_is_case_insensitive_across_fields() {
        let q = TextQuery::new("ALGIERS");
        assert!(q.matches_any(&["txn_1", "AutoParts Algiers"]));
        assert!(!q.matches_any(&["Oran Car Services", "txn_2"]));
    }

    #[test]
    fn choice_wire_format_uses_labels() {
        let all: Choice<String> = serde_json::from_str("\"All\"").unwrap();
        assert_eq!(all, Choice::All);
        let oran: Choice<String> = serde_json::from_str("\"Oran\"").unwrap();
        assert_eq!(oran, Choice::Only("Oran".to_string()));
        assert_eq!(serde_json::to_string(&oran).unwrap(), "\"Oran\"");
    }

    #[test]
    fn date_range_bounds_are_inclusive() {
        let from = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2026, 1, 31, 0, 0, 0).unwrap();
        let range = DateRange::new(from, to);
        assert!(range.contains(from));
        assert!(range.contains(to));
        assert!(!range.contains(to + Duration::seconds(1)));
        assert!(DateRange::admits(&None, to + Duration::days(365)));
    }

    #[test]
    fn half_open_range_admits_everything() {
        let from = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let range: DateRange =
            serde_json::from_str(r#"{"from":"2026-01-01T00:00:00Z"}"#).unwrap();
        assert_eq!(range.from, Some(from));
        assert!(!range.is_complete());
        assert!(range.contains(from - Duration::days(400)));
    }

    #[test]
    fn oversized_window_leaves_start_open() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let range = DateRange::trailing_days(now, i64::MAX);
        assert_eq!(range.from, None);
        assert!(range.contains(now));
    }
}
