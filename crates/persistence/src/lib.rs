//! Healthcare Software Listing Persistence Layer
//!
//! This crate holds the storage, mapping and paging core behind the listing
//! service: companies that publish healthcare software and the products they
//! sell. The HTTP surface lives in `hsl-rest`; everything that decides *which*
//! records a listing returns, and in what order, lives here.
//!
//! # Features
//!
//! - **Property mappings**: Client-facing field names resolve to one or more
//!   storage paths, optionally with inverted sort direction
//! - **Sort expressions**: `orderBy` clauses compile into a stable comparator
//! - **Pagination**: Bounded pages with total counts and page metadata
//! - **Field access**: Named, case-insensitive field accessors used for
//!   sorting and response shaping
//!
//! # Backend Features
//!
//! ```toml
//! [dependencies]
//! hsl-persistence = { version = "0.1", features = ["sqlite"] }
//! ```
//!
//! - `sqlite` (default) - SQLite with in-memory and file modes
//!
//! The in-memory backend is always available.
//!
//! # Architecture
//!
//! - [`types`] - Domain records, query parameters, field values and pages
//! - [`mapping`] - The property mapping registry and sort expression builder
//! - [`core`] - The storage trait and the listing pipeline
//! - [`error`] - Error types for all operations
//! - [`backends`] - Backend implementations
//!
//! # Quick Start
//!
//! ```
//! use hsl_persistence::mapping::{COMPANY_VIEW, listing_registry};
//!
//! let registry = listing_registry().unwrap();
//! let table = registry.mapping(COMPANY_VIEW, "Company").unwrap();
//!
//! // `age` sorts by founding date, newest first
//! let targets = table.resolve("age").unwrap();
//! assert_eq!(targets[0].storage_path, "StartDate");
//! assert!(targets[0].invert_order);
//!
//! assert!(table.validate_field_list("name desc, age"));
//! assert!(!table.validate_field_list("revenue"));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod mapping;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};
pub use types::{Company, PagedList, Product, ResourceQuery};

// Re-export core traits
pub use core::{ListingSchema, ListingStorage};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
