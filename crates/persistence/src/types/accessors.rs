//! Field accessor tables.
//!
//! Each record type that takes part in sorting or projection publishes a
//! [`FieldAccessors`] table: its declared field names, in declaration order,
//! paired with a getter returning a [`FieldValue`]. Tables are built once at
//! startup and shared read-only.
//!
//! Field lookup is case-insensitive; the declared spelling is what appears
//! in projected output.

use std::fmt;

use crate::error::{QueryError, StorageResult};

use super::FieldValue;

/// Getter for a single declared field.
pub type FieldGetter<T> = fn(&T) -> FieldValue;

/// A record type with a published accessor table.
pub trait Shaped: Sized {
    /// Name of the type, as used in mapping registry keys.
    const TYPE_NAME: &'static str;

    /// Builds the accessor table for this type.
    fn accessors() -> FieldAccessors<Self>;
}

/// A declared field: its name and getter.
pub struct FieldAccessor<T> {
    name: &'static str,
    getter: FieldGetter<T>,
}

impl<T> FieldAccessor<T> {
    /// Returns the declared field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Reads the field from a record.
    pub fn get(&self, record: &T) -> FieldValue {
        (self.getter)(record)
    }

    /// Returns the raw getter.
    pub fn getter(&self) -> FieldGetter<T> {
        self.getter
    }
}

impl<T> Clone for FieldAccessor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldAccessor<T> {}

impl<T> fmt::Debug for FieldAccessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldAccessor").field(&self.name).finish()
    }
}

/// Ordered accessor table for a record type.
pub struct FieldAccessors<T> {
    type_name: &'static str,
    fields: Vec<FieldAccessor<T>>,
}

impl<T> FieldAccessors<T> {
    /// Creates an empty table for the named type.
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: Vec::new(),
        }
    }

    /// Appends a declared field.
    pub fn field(mut self, name: &'static str, getter: FieldGetter<T>) -> Self {
        self.fields.push(FieldAccessor { name, getter });
        self
    }

    /// Returns the name of the record type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns all declared fields in declaration order.
    pub fn fields(&self) -> &[FieldAccessor<T>] {
        &self.fields
    }

    /// Returns the declared field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// Returns the number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks up a field by name, ignoring case.
    pub fn find(&self, name: &str) -> Option<&FieldAccessor<T>> {
        let name = name.trim();
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Returns true if the type declares the named field.
    pub fn has_field(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Checks a comma-separated field list against the declared fields.
    ///
    /// A blank list is valid. Empty tokens are ignored.
    pub fn validate_fields(&self, fields: &str) -> StorageResult<()> {
        self.select(fields).map(|_| ())
    }

    /// Resolves a comma-separated field list into accessors.
    ///
    /// A blank list selects every declared field in declaration order.
    /// Otherwise the result follows the order of the list; a field named
    /// more than once is kept at its first position.
    pub fn select(&self, fields: &str) -> StorageResult<Vec<FieldAccessor<T>>> {
        if fields.trim().is_empty() {
            return Ok(self.fields.clone());
        }

        let mut selected: Vec<FieldAccessor<T>> = Vec::new();
        for token in fields.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let accessor = self.find(token).ok_or_else(|| QueryError::UnknownProjectionField {
                resource_type: self.type_name.to_string(),
                field: token.to_string(),
            })?;
            if !selected.iter().any(|s| s.name == accessor.name) {
                selected.push(*accessor);
            }
        }
        Ok(selected)
    }
}

impl<T> Clone for FieldAccessors<T> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name,
            fields: self.fields.clone(),
        }
    }
}

impl<T> fmt::Debug for FieldAccessors<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessors")
            .field("type_name", &self.type_name)
            .field("fields", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;

    struct Sample {
        id: i64,
        label: String,
    }

    impl Shaped for Sample {
        const TYPE_NAME: &'static str = "Sample";

        fn accessors() -> FieldAccessors<Self> {
            FieldAccessors::<Self>::new(Self::TYPE_NAME)
                .field("id", |s| FieldValue::Integer(s.id))
                .field("label", |s| FieldValue::text(&s.label))
        }
    }

    #[test]
    fn test_find_ignores_case() {
        let accessors = Sample::accessors();
        assert_eq!(accessors.find("ID").map(|f| f.name()), Some("id"));
        assert_eq!(accessors.find(" Label ").map(|f| f.name()), Some("label"));
        assert!(accessors.find("missing").is_none());
    }

    #[test]
    fn test_select_blank_returns_declaration_order() {
        let accessors = Sample::accessors();
        let names: Vec<_> = accessors
            .select("  ")
            .unwrap()
            .iter()
            .map(|f| f.name())
            .collect();
        assert_eq!(names, vec!["id", "label"]);
    }

    #[test]
    fn test_select_follows_request_order() {
        let accessors = Sample::accessors();
        let names: Vec<_> = accessors
            .select("Label,Id,label")
            .unwrap()
            .iter()
            .map(|f| f.name())
            .collect();
        assert_eq!(names, vec!["label", "id"]);
    }

    #[test]
    fn test_select_unknown_field() {
        let accessors = Sample::accessors();
        let err = accessors.select("id,rating").unwrap_err();
        match err {
            StorageError::Query(QueryError::UnknownProjectionField {
                resource_type,
                field,
            }) => {
                assert_eq!(resource_type, "Sample");
                assert_eq!(field, "rating");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_getter_reads_record() {
        let accessors = Sample::accessors();
        let sample = Sample {
            id: 7,
            label: "seven".to_string(),
        };
        let label = accessors.find("label").unwrap();
        assert_eq!(label.get(&sample), FieldValue::text("seven"));
    }
}
