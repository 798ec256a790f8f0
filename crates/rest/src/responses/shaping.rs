//! Field projection.
//!
//! Reduces records to a client-chosen subset of their declared fields. The
//! field list is validated in full before any record is touched, so a bad
//! token never yields a partial result.
//!
//! # Example
//!
//! ```rust,ignore
//! let shaped = shape_data(&companies, &CompanyDto::accessors(), "Id,Name")?;
//! assert_eq!(shaped[0].names().collect::<Vec<_>>(), vec!["id", "name"]);
//! ```

use hsl_persistence::error::StorageResult;
use hsl_persistence::types::{FieldAccessor, FieldAccessors, FieldValue, Link};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Member name under which links are attached to a shaped record.
pub const LINKS_MEMBER: &str = "links";

/// An ordered list of `(name, value)` pairs.
///
/// Serializes as a JSON object whose members keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapedRecord {
    fields: Vec<(&'static str, FieldValue)>,
}

impl ShapedRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, replacing an existing value with the same name.
    pub fn insert(&mut self, name: &'static str, value: FieldValue) {
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Attaches links under [`LINKS_MEMBER`].
    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.insert(LINKS_MEMBER, FieldValue::Links(links));
        self
    }

    /// Looks up a value by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Returns the field names in order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(n, _)| *n)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record holds no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ShapedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Projects one record through already-selected accessors.
pub fn shape_record<T>(record: &T, accessors: &[FieldAccessor<T>]) -> ShapedRecord {
    ShapedRecord {
        fields: accessors.iter().map(|a| (a.name(), a.get(record))).collect(),
    }
}

/// Projects one record.
///
/// Fails with `UnknownProjectionField` if `fields` names an undeclared field.
pub fn shape<T>(record: &T, table: &FieldAccessors<T>, fields: &str) -> StorageResult<ShapedRecord> {
    let selected = table.select(fields)?;
    Ok(shape_record(record, &selected))
}

/// Projects a sequence of records.
///
/// A blank `fields` keeps every declared field in declaration order;
/// otherwise output follows the order of `fields`.
pub fn shape_data<T>(
    records: &[T],
    table: &FieldAccessors<T>,
    fields: &str,
) -> StorageResult<Vec<ShapedRecord>> {
    let selected = table.select(fields)?;
    Ok(records
        .iter()
        .map(|record| shape_record(record, &selected))
        .collect())
}
