//! Database backend implementations.
//!
//! This module contains implementations of [`ListingStorage`](crate::core::ListingStorage).
//! Database backends are gated behind a feature flag.
//!
//! # Available Backends
//!
//! | Backend | Feature | Description |
//! |---------|---------|-------------|
//! | In-memory | always | Lock-protected vectors, used for tests and demos |
//! | SQLite | `sqlite` | Embedded database, in-memory or file-based |
//!
//! # Example
//!
//! ```no_run
//! use hsl_persistence::backends::memory::InMemoryBackend;
//! # #[cfg(feature = "sqlite")]
//! use hsl_persistence::backends::sqlite::SqliteBackend;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = InMemoryBackend::new();
//!
//! # #[cfg(feature = "sqlite")]
//! # {
//! // Or use a file-based database
//! let backend = SqliteBackend::open("./data/listing.db")?;
//! backend.init_schema()?;
//! # }
//! # Ok(())
//! # }
//! ```

pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;
