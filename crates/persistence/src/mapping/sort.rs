//! Sort expression builder.
//!
//! An order-by string such as `"Name desc, Age"` is parsed into an
//! [`OrderClause`], expanded through a [`MappingTable`] into storage-level
//! [`SortKey`]s, and compiled against an accessor table into a
//! [`RecordComparator`] that can order any sequence of stored records.
//!
//! The first clause is the primary key. Each later clause, and each extra
//! storage path of a multi-path field, only breaks ties left by the keys
//! before it.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigurationError, QueryError, StorageError, StorageResult};
use crate::types::{FieldAccessors, FieldGetter};

use super::registry::MappingTable;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Applies the direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Ascending),
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

/// One clause of an order-by list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTerm {
    /// Logical field name as written by the client.
    pub field: String,
    /// Requested direction.
    pub direction: SortDirection,
}

/// A parsed order-by list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderClause {
    terms: Vec<OrderTerm>,
}

impl OrderClause {
    /// Parses a comma-separated order-by list.
    ///
    /// Each clause is a field name, optionally followed by a direction.
    /// Only the first word names the field. A clause ending in `desc` or
    /// `descending` sorts descending; any other trailing words leave it
    /// ascending. Empty clauses are skipped.
    pub fn parse(order_by: &str) -> Self {
        let terms = order_by
            .split(',')
            .filter_map(|raw| {
                let mut words = raw.split_whitespace();
                let field = words.next()?;
                let direction = words
                    .last()
                    .and_then(SortDirection::from_keyword)
                    .unwrap_or(SortDirection::Ascending);
                Some(OrderTerm {
                    field: field.to_string(),
                    direction,
                })
            })
            .collect();

        Self { terms }
    }

    /// Returns the clauses in precedence order.
    pub fn terms(&self) -> &[OrderTerm] {
        &self.terms
    }

    /// Returns true if no clause was given.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl FromStr for OrderClause {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// A storage-level sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// Declared field name on the storage type.
    pub storage_path: String,
    /// Effective direction after inversion.
    pub direction: SortDirection,
}

/// An ordered list of storage-level sort keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortExpression {
    keys: Vec<SortKey>,
}

impl SortExpression {
    /// Parses and expands an order-by string.
    pub fn build(order_by: &str, table: &MappingTable) -> StorageResult<Self> {
        let clause = OrderClause::parse(order_by);
        Self::from_clause(&clause, table)
    }

    /// Expands a parsed clause through a mapping table.
    ///
    /// Fields mapping to several storage paths contribute one key per path,
    /// in registry order. Paths marked `invert_order` take the opposite of
    /// the requested direction.
    pub fn from_clause(clause: &OrderClause, table: &MappingTable) -> StorageResult<Self> {
        let mut keys = Vec::new();

        for term in clause.terms() {
            let targets = table
                .resolve(&term.field)
                .ok_or_else(|| QueryError::InvalidSortField {
                    field: term.field.clone(),
                })?;

            keys.extend(targets.iter().map(|target| SortKey {
                storage_path: target.storage_path.clone(),
                direction: if target.invert_order {
                    term.direction.reversed()
                } else {
                    term.direction
                },
            }));
        }

        Ok(Self { keys })
    }

    /// Returns the keys in precedence order.
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Returns true if there is nothing to sort by.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Binds each key to a getter on the storage type.
    pub fn compile<T>(&self, accessors: &FieldAccessors<T>) -> StorageResult<RecordComparator<T>> {
        let keys = self
            .keys
            .iter()
            .map(|key| {
                accessors
                    .find(&key.storage_path)
                    .map(|accessor| (accessor.getter(), key.direction))
                    .ok_or_else(|| {
                        StorageError::from(ConfigurationError::UnknownStoragePath {
                            source_type: accessors.type_name().to_string(),
                            destination_type: accessors.type_name().to_string(),
                            field: key.storage_path.clone(),
                            path: key.storage_path.clone(),
                        })
                    })
            })
            .collect::<StorageResult<Vec<_>>>()?;

        Ok(RecordComparator { keys })
    }
}

/// A compiled multi-key comparator over records of type `T`.
pub struct RecordComparator<T> {
    keys: Vec<(FieldGetter<T>, SortDirection)>,
}

impl<T> RecordComparator<T> {
    /// Compares two records key by key.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        for (getter, direction) in &self.keys {
            let ordering = direction.apply(getter(a).compare(&getter(b)));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Stable-sorts a slice of records.
    pub fn sort(&self, records: &mut [T]) {
        records.sort_by(|a, b| self.compare(a, b));
    }

    /// Returns true if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

impl<T> Clone for RecordComparator<T> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
        }
    }
}

impl<T> fmt::Debug for RecordComparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordComparator")
            .field("keys", &self.keys.len())
            .finish()
    }
}
