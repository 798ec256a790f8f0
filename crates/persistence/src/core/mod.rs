//! Core storage traits and abstractions.
//!
//! This module provides the foundational pieces of the persistence layer:
//!
//! - [`ListingStorage`] - The storage collaborator (CRUD plus filtering)
//! - [`RecordSource`], [`Collection`] - Countable, ordered record sequences
//! - [`ListingSchema`] - Validation, sorting and projection tables per view
//! - [`list_companies`], [`list_products`] - The listing pipeline
//!
//! # Pipeline
//!
//! ```text
//! order-by ──► MappingTable::check_field_list ─┐
//! fields   ──► FieldAccessors::validate_fields ├─► RecordComparator
//!                                               │
//! filter   ──► ListingStorage::filter_companies ┴─► Collection::order_by ─► PagedList::create
//! ```

mod listing;
mod source;
mod storage;

pub use listing::{ListingSchema, list_companies, list_products};
pub use source::{Collection, RecordSource};
pub use storage::{ListingStorage, already_exists, company_not_found, product_not_found};
