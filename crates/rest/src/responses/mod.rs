//! Response building for the listing REST API.
//!
//! This module provides the pieces handlers assemble responses from:
//!
//! - [`shaping`] - Field projection into ordered records
//! - [`links`] - Hypermedia link assembly
//! - [`headers`] - The `X-Pagination` header

pub mod headers;
pub mod links;
pub mod shaping;

pub use headers::{PageLinks, PaginationHeader, X_PAGINATION};
pub use links::{LinkAssembler, LinkedCollection};
pub use shaping::{LINKS_MEMBER, ShapedRecord, shape, shape_data, shape_record};
