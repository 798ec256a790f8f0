//! Logical-field mapping and sort expression building.
//!
//! - [`PropertyMappingRegistry`] - `(view, storage)` type pair to [`MappingTable`]
//! - [`OrderClause`] - Parsed client order-by list
//! - [`SortExpression`] - Storage-level sort keys
//! - [`RecordComparator`] - Compiled comparator over stored records
//!
//! # Example
//!
//! ```
//! use hsl_persistence::mapping::{SortExpression, listing_registry, COMPANY_VIEW};
//! use hsl_persistence::types::{Company, Shaped};
//!
//! let registry = listing_registry().unwrap();
//! let table = registry.mapping(COMPANY_VIEW, Company::TYPE_NAME).unwrap();
//!
//! let comparator = SortExpression::build("Name desc, Age", table)
//!     .unwrap()
//!     .compile(&Company::accessors())
//!     .unwrap();
//! assert_eq!(comparator.len(), 2);
//! ```

mod listing;
mod registry;
mod sort;

pub use listing::{
    COMPANY_VIEW, PRODUCT_VIEW, company_mappings, listing_registry, product_mappings,
};
pub use registry::{MappingEntry, MappingTable, MappingTarget, PropertyMappingRegistry};
pub use sort::{OrderClause, OrderTerm, RecordComparator, SortDirection, SortExpression, SortKey};
