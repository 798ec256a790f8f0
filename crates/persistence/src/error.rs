//! Error types for the persistence layer.
//!
//! This module defines all error types used throughout the persistence layer,
//! following a hierarchy that separates resource state errors, query errors
//! raised while validating client input, configuration errors detected at
//! startup, and backend failures.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
///
/// This enum encompasses all possible errors that can occur during persistence
/// operations, organized by category.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Resource state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Client query errors (sorting and projection)
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Mapping and accessor configuration errors
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors related to resource state.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The requested resource was not found.
    #[error("resource not found: {resource_type}/{id}")]
    NotFound { resource_type: String, id: String },

    /// A resource with the given ID already exists.
    #[error("resource already exists: {resource_type}/{id}")]
    AlreadyExists { resource_type: String, id: String },
}

/// Errors raised while validating the order-by and fields parameters of a query.
///
/// Both are detected before any record is read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// An order-by token names a field without a registered mapping, or
    /// carries an unrecognised direction keyword.
    #[error("invalid sort field: '{field}'")]
    InvalidSortField { field: String },

    /// A fields token does not name a declared field of the projected type.
    #[error("unknown field '{field}' for {resource_type}")]
    UnknownProjectionField { resource_type: String, field: String },
}

/// Errors in the mapping registry or accessor tables.
///
/// These indicate a programming error and are surfaced when application
/// state is constructed, never per request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// No mapping table is registered for the type pair.
    #[error("no property mapping registered from {source_type} to {destination_type}")]
    MissingMapping {
        source_type: String,
        destination_type: String,
    },

    /// A mapping table for the type pair was registered twice.
    #[error("property mapping from {source_type} to {destination_type} registered twice")]
    DuplicateMapping {
        source_type: String,
        destination_type: String,
    },

    /// A logical field maps to no storage path.
    #[error("mapping for {source_type}.{field} has no storage paths")]
    EmptyMapping { source_type: String, field: String },

    /// A storage path has no accessor on the storage type.
    #[error("storage path '{path}' (from {source_type}.{field}) is not a field of {destination_type}")]
    UnknownStoragePath {
        source_type: String,
        destination_type: String,
        field: String,
        path: String,
    },
}

/// Errors from the storage backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A stored value could not be decoded.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// Returns true if this error was caused by invalid client input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, StorageError::Query(_) | StorageError::Resource(_))
    }
}
