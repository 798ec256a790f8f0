//! Field values and hypermedia links.
//!
//! [`FieldValue`] is the closed set of values a projected field may hold.
//! It replaces loosely typed property bags: every accessor returns one of
//! these variants, and the sort comparator and JSON serializer work on them
//! without knowing the record type they came from.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A hypermedia link attached to a resource or collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Absolute URL of the target.
    pub href: String,
    /// Link relation (e.g. `self`, `delete_company`, `nextPage`).
    #[serde(rename = "rel")]
    pub relation: String,
    /// HTTP method to use against `href`.
    pub method: String,
}

impl Link {
    /// Creates a new link.
    pub fn new(
        href: impl Into<String>,
        relation: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            href: href.into(),
            relation: relation.into(),
            method: method.into(),
        }
    }
}

/// A single field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Absent value.
    Null,
    /// Text value.
    Text(String),
    /// Integer value.
    Integer(i64),
    /// Boolean value.
    Boolean(bool),
    /// Point in time.
    Timestamp(DateTime<Utc>),
    /// Attached links.
    Links(Vec<Link>),
}

impl FieldValue {
    /// Creates a text value.
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Maps `None` to [`FieldValue::Null`].
    pub fn optional_text(value: Option<&str>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::text)
    }

    /// Maps `None` to [`FieldValue::Null`].
    pub fn optional_timestamp(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Timestamp)
    }

    /// Returns true for [`FieldValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Returns the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Total order used by the sort builder.
    ///
    /// Nulls sort first. Text compares case-insensitively, so values that
    /// differ only by case tie and fall through to the next sort key.
    /// Values of different variants order by variant.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => compare_text(a, b),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.cmp(b),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
            (FieldValue::Links(a), FieldValue::Links(b)) => a.len().cmp(&b.len()),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Boolean(_) => 1,
            FieldValue::Integer(_) => 2,
            FieldValue::Timestamp(_) => 3,
            FieldValue::Text(_) => 4,
            FieldValue::Links(_) => 5,
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::text(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<Vec<Link>> for FieldValue {
    fn from(value: Vec<Link>) -> Self {
        FieldValue::Links(value)
    }
}
