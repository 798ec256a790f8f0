//! Error types for the listing REST API.
//!
//! This module defines all error types used throughout the REST API layer,
//! with automatic conversion to JSON problem responses.
//!
//! # Error Mapping
//!
//! Storage errors from the persistence layer are automatically mapped to
//! appropriate HTTP status codes:
//!
//! | Storage Error | HTTP Status |
//! |--------------|-------------|
//! | NotFound | 404 |
//! | AlreadyExists | 409 |
//! | InvalidSortField | 400 |
//! | UnknownProjectionField | 400 |
//! | Configuration | 500 |
//! | Backend | 500 |

use std::collections::BTreeMap;
use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hsl_persistence::error::{
    BackendError, ConfigurationError, QueryError, ResourceError, StorageError,
};
use tracing::error;

use crate::models::ValidationErrors;

/// The primary error type for REST API operations.
///
/// This enum provides semantic error types that map cleanly to HTTP status codes.
#[derive(Debug)]
pub enum RestError {
    /// Resource not found (HTTP 404).
    NotFound {
        /// The resource type (e.g., "Company").
        resource_type: String,
        /// The resource ID.
        id: String,
    },

    /// Resource already exists (HTTP 409).
    Conflict {
        /// The resource type.
        resource_type: String,
        /// The resource ID.
        id: String,
    },

    /// Bad request (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Unsupported media type (HTTP 415).
    UnsupportedMediaType {
        /// The unsupported content type.
        content_type: String,
    },

    /// Input failed validation (HTTP 422).
    UnprocessableEntity {
        /// Messages keyed by the offending member.
        errors: BTreeMap<String, Vec<String>>,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::NotFound { resource_type, id } => {
                write!(f, "Resource not found: {}/{}", resource_type, id)
            }
            RestError::Conflict { resource_type, id } => {
                write!(f, "Resource already exists: {}/{}", resource_type, id)
            }
            RestError::BadRequest { message } => {
                write!(f, "Bad request: {}", message)
            }
            RestError::UnsupportedMediaType { content_type } => {
                write!(f, "Unsupported media type: {}", content_type)
            }
            RestError::UnprocessableEntity { errors } => {
                write!(f, "Validation failed for {} member(s)", errors.len())
            }
            RestError::InternalError { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for RestError {}

impl RestError {
    /// Creates a 422 error with a single message.
    pub fn unprocessable(member: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(member.into(), vec![message.into()]);
        RestError::UnprocessableEntity { errors }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::Conflict { .. } => StatusCode::CONFLICT,
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RestError::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = match &self {
            RestError::NotFound { resource_type, id } => {
                format!("{} {} was not found", resource_type, id)
            }
            RestError::Conflict { resource_type, id } => {
                format!("{} {} already exists", resource_type, id)
            }
            RestError::BadRequest { message } => message.clone(),
            RestError::UnsupportedMediaType { content_type } => {
                format!("Content type '{}' is not supported", content_type)
            }
            RestError::UnprocessableEntity { .. } => {
                "One or more validation errors occurred.".to_string()
            }
            RestError::InternalError { message } => {
                error!(error = %message, "Request failed");
                "An unexpected fault happened. Try again later.".to_string()
            }
        };

        let mut body = problem_details(status, &detail);
        if let RestError::UnprocessableEntity { errors } = self {
            body["errors"] = serde_json::json!(errors);
        }

        (status, Json(body)).into_response()
    }
}

/// Creates a problem body.
///
/// # Arguments
///
/// * `status` - The HTTP status of the response
/// * `detail` - Human-readable details
fn problem_details(status: StatusCode, detail: &str) -> serde_json::Value {
    serde_json::json!({
        "status": status.as_u16(),
        "title": status.canonical_reason().unwrap_or("Error"),
        "detail": detail
    })
}

// Implement conversions from storage errors

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Resource(e) => e.into(),
            StorageError::Query(e) => e.into(),
            StorageError::Configuration(e) => e.into(),
            StorageError::Backend(e) => e.into(),
        }
    }
}

impl From<ResourceError> for RestError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound { resource_type, id } => {
                RestError::NotFound { resource_type, id }
            }
            ResourceError::AlreadyExists { resource_type, id } => {
                RestError::Conflict { resource_type, id }
            }
        }
    }
}

impl From<QueryError> for RestError {
    fn from(err: QueryError) -> Self {
        RestError::BadRequest {
            message: err.to_string(),
        }
    }
}

impl From<ConfigurationError> for RestError {
    fn from(err: ConfigurationError) -> Self {
        RestError::InternalError {
            message: err.to_string(),
        }
    }
}

impl From<BackendError> for RestError {
    fn from(err: BackendError) -> Self {
        RestError::InternalError {
            message: err.to_string(),
        }
    }
}

impl From<ValidationErrors> for RestError {
    fn from(err: ValidationErrors) -> Self {
        RestError::UnprocessableEntity {
            errors: err.into_map(),
        }
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        RestError::BadRequest {
            message: format!("Invalid JSON: {}", err),
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
