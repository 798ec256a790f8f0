//! SQLite backend implementation.
//!
//! This module provides a SQLite implementation of
//! [`ListingStorage`](crate::core::ListingStorage). It supports both
//! in-memory databases (great for testing) and file-based databases (for
//! development and small deployments).
//!
//! # Example
//!
//! ```no_run
//! use hsl_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Create an in-memory database
//! let backend = SqliteBackend::in_memory()?;
//!
//! // Initialize the schema
//! backend.init_schema()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE companies (
//!     seq INTEGER PRIMARY KEY AUTOINCREMENT,  -- insertion order
//!     id TEXT NOT NULL UNIQUE,
//!     name TEXT NOT NULL,
//!     location TEXT,
//!     start_date TEXT NOT NULL,               -- RFC 3339
//!     date_of_demise TEXT                     -- added in v2
//! );
//!
//! CREATE TABLE products (
//!     seq INTEGER PRIMARY KEY AUTOINCREMENT,
//!     id TEXT NOT NULL UNIQUE,
//!     company_id TEXT NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
//!     name TEXT NOT NULL
//! );
//! ```
//!
//! Filters run as SQL `WHERE` clauses. Ordering and paging are left to the
//! listing pipeline.

mod backend;
mod schema;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
pub use schema::SCHEMA_VERSION;
