//! Property mapping registry.
//!
//! The registry maps the logical field names clients use (the fields of a
//! view type such as `CompanyDto`) onto one or more storage paths of the
//! stored type (`Company`). Sorting by a logical field sorts by each of its
//! storage paths in turn, optionally inverted: `Age` maps to `StartDate`
//! inverted, because an older company has an earlier start date.
//!
//! Tables are keyed by the `(source, destination)` type-name pair and built
//! once at startup.

use std::collections::HashMap;

use crate::error::{ConfigurationError, QueryError, StorageResult};
use crate::types::FieldAccessors;

use super::sort::OrderClause;

/// A single storage path a logical field sorts by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTarget {
    /// Declared field name on the storage type.
    pub storage_path: String,
    /// Whether an ascending request sorts this path descending.
    pub invert_order: bool,
}

impl MappingTarget {
    /// Creates a target sorted in the requested direction.
    pub fn new(storage_path: impl Into<String>) -> Self {
        Self {
            storage_path: storage_path.into(),
            invert_order: false,
        }
    }

    /// Creates a target sorted against the requested direction.
    pub fn inverted(storage_path: impl Into<String>) -> Self {
        Self {
            storage_path: storage_path.into(),
            invert_order: true,
        }
    }
}

/// A logical field and the storage paths it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    /// Logical field name.
    pub field: String,
    /// Storage paths, in tie-break order.
    pub targets: Vec<MappingTarget>,
}

/// The mapping for one `(source, destination)` type pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    source_type: String,
    destination_type: String,
    entries: Vec<MappingEntry>,
}

impl MappingTable {
    /// Creates an empty table.
    pub fn new(source_type: impl Into<String>, destination_type: impl Into<String>) -> Self {
        Self {
            source_type: source_type.into(),
            destination_type: destination_type.into(),
            entries: Vec::new(),
        }
    }

    /// Adds a logical field.
    pub fn map<I>(mut self, field: impl Into<String>, targets: I) -> Self
    where
        I: IntoIterator<Item = MappingTarget>,
    {
        self.entries.push(MappingEntry {
            field: field.into(),
            targets: targets.into_iter().collect(),
        });
        self
    }

    /// Returns the logical (view) type name.
    pub fn source_type(&self) -> &str {
        &self.source_type
    }

    /// Returns the storage type name.
    pub fn destination_type(&self) -> &str {
        &self.destination_type
    }

    /// Returns all entries in registration order.
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Returns the storage paths for a logical field, ignoring case.
    pub fn resolve(&self, field: &str) -> Option<&[MappingTarget]> {
        let field = field.trim();
        self.entries
            .iter()
            .find(|e| e.field.eq_ignore_ascii_case(field))
            .map(|e| e.targets.as_slice())
    }

    /// Returns true if the logical field is mapped.
    pub fn has_field(&self, field: &str) -> bool {
        self.resolve(field).is_some()
    }

    /// Returns true if every clause of a comma-separated order-by list names
    /// a mapped field. A blank list is valid.
    pub fn validate_field_list(&self, order_by: &str) -> bool {
        self.check_field_list(order_by).is_ok()
    }

    /// Parses an order-by list and checks every field is mapped.
    pub fn check_field_list(&self, order_by: &str) -> StorageResult<OrderClause> {
        let clause = OrderClause::parse(order_by);
        if let Some(term) = clause.terms().iter().find(|t| !self.has_field(&t.field)) {
            return Err(QueryError::InvalidSortField {
                field: term.field.clone(),
            }
            .into());
        }
        Ok(clause)
    }

    /// Checks that every entry has at least one target and that every target
    /// names a declared field of the storage type.
    pub fn verify_against<T>(&self, storage: &FieldAccessors<T>) -> Result<(), ConfigurationError> {
        for entry in &self.entries {
            if entry.targets.is_empty() {
                return Err(ConfigurationError::EmptyMapping {
                    source_type: self.source_type.clone(),
                    field: entry.field.clone(),
                });
            }
            for target in &entry.targets {
                if !storage.has_field(&target.storage_path) {
                    return Err(ConfigurationError::UnknownStoragePath {
                        source_type: self.source_type.clone(),
                        destination_type: self.destination_type.clone(),
                        field: entry.field.clone(),
                        path: target.storage_path.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Registry of mapping tables keyed by `(source, destination)` type names.
#[derive(Debug, Clone, Default)]
pub struct PropertyMappingRegistry {
    tables: HashMap<(String, String), MappingTable>,
}

impl PropertyMappingRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table.
    pub fn register(&mut self, table: MappingTable) -> Result<(), ConfigurationError> {
        let key = (table.source_type.clone(), table.destination_type.clone());
        if self.tables.contains_key(&key) {
            return Err(ConfigurationError::DuplicateMapping {
                source_type: key.0,
                destination_type: key.1,
            });
        }
        self.tables.insert(key, table);
        Ok(())
    }

    /// Registers a table, builder style.
    pub fn with_table(mut self, table: MappingTable) -> Result<Self, ConfigurationError> {
        self.register(table)?;
        Ok(self)
    }

    /// Returns the table for a type pair.
    pub fn mapping(
        &self,
        source_type: &str,
        destination_type: &str,
    ) -> Result<&MappingTable, ConfigurationError> {
        self.tables
            .get(&(source_type.to_string(), destination_type.to_string()))
            .ok_or_else(|| ConfigurationError::MissingMapping {
                source_type: source_type.to_string(),
                destination_type: destination_type.to_string(),
            })
    }

    /// Returns the storage paths for a logical field.
    pub fn resolve(
        &self,
        source_type: &str,
        destination_type: &str,
        field: &str,
    ) -> StorageResult<&[MappingTarget]> {
        let table = self.mapping(source_type, destination_type)?;
        table.resolve(field).ok_or_else(|| {
            QueryError::InvalidSortField {
                field: field.trim().to_string(),
            }
            .into()
        })
    }

    /// Returns true if any table for the source type maps the field.
    pub fn has_field(&self, source_type: &str, field: &str) -> bool {
        self.tables
            .values()
            .filter(|t| t.source_type == source_type)
            .any(|t| t.has_field(field))
    }

    /// Validates a comma-separated order-by list for a type pair.
    pub fn validate_field_list(
        &self,
        source_type: &str,
        destination_type: &str,
        order_by: &str,
    ) -> Result<bool, ConfigurationError> {
        Ok(self
            .mapping(source_type, destination_type)?
            .validate_field_list(order_by))
    }

    /// Returns the number of registered tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if no table is registered.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::types::{Company, Shaped};

    fn company_table() -> MappingTable {
        MappingTable::new("CompanyDto", "Company")
            .map("Id", [MappingTarget::new("Id")])
            .map("Name", [MappingTarget::new("Name")])
            .map("Age", [MappingTarget::inverted("StartDate")])
    }

    fn registry() -> PropertyMappingRegistry {
        PropertyMappingRegistry::new()
            .with_table(company_table())
            .unwrap()
    }

    #[test]
    fn test_resolve_ignores_case() {
        let registry = registry();
        let targets = registry.resolve("CompanyDto", "Company", "age").unwrap();
        assert_eq!(targets, &[MappingTarget::inverted("StartDate")]);
    }

    #[test]
    fn test_resolve_unknown_field() {
        let err = registry()
            .resolve("CompanyDto", "Company", "rating")
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::Query(QueryError::InvalidSortField { .. })
        ));
    }

    #[test]
    fn test_missing_pair_is_configuration_error() {
        let err = registry().mapping("ProductDto", "Product").unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingMapping {
                source_type: "ProductDto".to_string(),
                destination_type: "Product".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_registration() {
        let err = registry().with_table(company_table()).unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicateMapping { .. }));
    }

    #[test]
    fn test_validate_field_list() {
        let registry = registry();
        let valid = |s: &str| {
            registry
                .validate_field_list("CompanyDto", "Company", s)
                .unwrap()
        };
        assert!(valid(""));
        assert!(valid("Name"));
        assert!(valid("name desc, age"));
        assert!(valid(" Id ascending ,"));
        assert!(!valid("rating"));
        assert!(!valid("Name, rating desc"));
        assert!(valid("Name sideways"));
        assert!(valid("Name desc please"));
    }

    #[test]
    fn test_has_field() {
        let registry = registry();
        assert!(registry.has_field("CompanyDto", "NAME"));
        assert!(!registry.has_field("CompanyDto", "location"));
        assert!(!registry.has_field("ProductDto", "name"));
    }

    #[test]
    fn test_verify_against_storage_accessors() {
        assert!(company_table().verify_against(&Company::accessors()).is_ok());

        let bad = MappingTable::new("CompanyDto", "Company")
            .map("Rating", [MappingTarget::new("Stars")]);
        assert!(matches!(
            bad.verify_against(&Company::accessors()),
            Err(ConfigurationError::UnknownStoragePath { .. })
        ));

        let empty =
            MappingTable::new("CompanyDto", "Company").map("Name", Vec::<MappingTarget>::new());
        assert!(matches!(
            empty.verify_against(&Company::accessors()),
            Err(ConfigurationError::EmptyMapping { .. })
        ));
    }
}
