//! Company id list extractor.
//!
//! Parses the `(id1,id2,...)` path segment used by company collections.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use thiserror::Error;
use uuid::Uuid;

use crate::error::RestError;

/// Errors raised while parsing an id list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdListError {
    /// The list held no ids.
    #[error("the id list is empty")]
    Empty,

    /// A token is not a valid UUID.
    #[error("'{0}' is not a valid id")]
    InvalidId(String),
}

impl From<IdListError> for RestError {
    fn from(err: IdListError) -> Self {
        RestError::BadRequest {
            message: err.to_string(),
        }
    }
}

/// A de-duplicated list of ids, in request order.
///
/// Surrounding parentheses are optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdList(pub Vec<Uuid>);

impl IdList {
    /// Parses `(a,b,c)` or `a,b,c`.
    pub fn parse(segment: &str) -> Result<Self, IdListError> {
        let trimmed = segment.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .unwrap_or(trimmed);

        let mut ids = Vec::new();
        for token in inner.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let id = Uuid::parse_str(token).map_err(|_| IdListError::InvalidId(token.to_string()))?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        if ids.is_empty() {
            return Err(IdListError::Empty);
        }
        Ok(IdList(ids))
    }

    /// Formats ids as `(a,b,c)`.
    pub fn format(ids: &[Uuid]) -> String {
        let joined = ids
            .iter()
            .map(Uuid::to_string)
            .collect::<Vec<_>>()
            .join(",");
        format!("({joined})")
    }

    /// Returns the ids.
    pub fn ids(&self) -> &[Uuid] {
        &self.0
    }
}

impl<S> FromRequestParts<S> for IdList
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::BadRequest {
                message: e.body_text(),
            })?;
        Ok(IdList::parse(&segment)?)
    }
}
