//! Core types for the persistence layer.
//!
//! This module provides the fundamental types used throughout the persistence layer:
//!
//! - [`Company`], [`Product`] - Stored records
//! - [`FieldValue`], [`Link`] - Closed set of projected values
//! - [`FieldAccessors`], [`Shaped`] - Per-type field accessor tables
//! - [`ResourceQuery`], [`CompanyFilter`] - Listing parameters
//! - [`PagedList`], [`PageMetadata`] - Pagination results
//!
//! # Examples
//!
//! ## Paging a collection
//!
//! ```
//! use hsl_persistence::core::Collection;
//! use hsl_persistence::types::PagedList;
//!
//! let source = Collection::new((1..=25).collect::<Vec<_>>());
//! let page = PagedList::create(&source, 2, 10);
//!
//! assert_eq!(page.items.first(), Some(&11));
//! assert_eq!(page.metadata.total_pages, 3);
//! assert!(page.metadata.has_next());
//! ```
//!
//! ## Building a query
//!
//! ```
//! use hsl_persistence::types::{CompanyFilter, ResourceQuery};
//!
//! let query = ResourceQuery::new()
//!     .with_page(1, 50, 10)
//!     .with_order_by("Name desc, Age")
//!     .with_filter(CompanyFilter {
//!         search_query: Some("soft".to_string()),
//!         ..Default::default()
//!     });
//!
//! assert_eq!(query.page_size, 10);
//! ```

mod accessors;
mod company;
mod pagination;
mod query;
mod value;

pub use accessors::{FieldAccessor, FieldAccessors, FieldGetter, Shaped};
pub use company::{Company, MAX_NAME_LENGTH, Product};
pub use pagination::{PageMetadata, PagedList};
pub use query::{
    CompanyFilter, DEFAULT_MAX_PAGE_SIZE, DEFAULT_ORDER_BY, ResourceQuery, clamp_page_size,
};
pub use value::{FieldValue, Link};
