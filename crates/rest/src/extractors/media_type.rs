//! Media type negotiation.
//!
//! - [`ResponseEnvelope`] - Chooses the plain or hypermedia envelope from `Accept`
//! - [`CompanyPayload`] - Company creation body, variant chosen by `Content-Type`
//! - [`JsonBody`] - Any other JSON request body

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{HeaderMap, header, request::Parts},
};
use mime::Mime;
use serde::de::DeserializeOwned;

use crate::error::RestError;
use crate::models::{CompanyForCreation, CompanyRepresentation};

/// Media type that selects the hypermedia envelope.
pub const HATEOAS_MEDIA_TYPE: &str = "application/vnd.marvin.hateoas+json";

/// Response envelope requested by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseEnvelope {
    /// Shaped records only; paging links travel in the `X-Pagination` header.
    #[default]
    Plain,
    /// Records wrapped with their hypermedia links.
    Linked,
}

impl ResponseEnvelope {
    /// Determines the envelope from an `Accept` header map.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let linked = headers
            .get_all(header::ACCEPT)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .filter_map(|v| v.trim().parse::<Mime>().ok())
            .any(|m| m.essence_str().eq_ignore_ascii_case(HATEOAS_MEDIA_TYPE));

        if linked {
            ResponseEnvelope::Linked
        } else {
            ResponseEnvelope::Plain
        }
    }

    /// Returns true for [`ResponseEnvelope::Linked`].
    pub fn is_linked(self) -> bool {
        self == ResponseEnvelope::Linked
    }
}

impl<S> FromRequestParts<S> for ResponseEnvelope
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ResponseEnvelope::from_headers(&parts.headers))
    }
}

/// Parses the request's `Content-Type`, if it has one.
fn content_type(headers: &HeaderMap) -> Result<Option<Mime>, RestError> {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return Ok(None);
    };
    let raw = value.to_str().map_err(|_| RestError::UnsupportedMediaType {
        content_type: String::from_utf8_lossy(value.as_bytes()).into_owned(),
    })?;
    raw.parse::<Mime>()
        .map(Some)
        .map_err(|_| RestError::UnsupportedMediaType {
            content_type: raw.to_string(),
        })
}

/// Returns true for `application/json` and any `+json` structured syntax.
fn is_json(mime: &Mime) -> bool {
    mime.subtype() == mime::JSON || mime.suffix().is_some_and(|s| s == mime::JSON)
}

async fn read_body<S>(req: Request, state: &S) -> Result<Bytes, RestError>
where
    S: Send + Sync,
{
    Bytes::from_request(req, state)
        .await
        .map_err(|e| RestError::BadRequest {
            message: format!("Could not read request body: {}", e.body_text()),
        })
}

/// Axum extractor for a company creation request.
///
/// The content type selects the [`CompanyRepresentation`]; anything else
/// (including a missing content type) is rejected with 415.
#[derive(Debug)]
pub struct CompanyPayload {
    /// Variant chosen by the content type.
    pub representation: CompanyRepresentation,
    /// Deserialized body.
    pub body: CompanyForCreation,
}

impl<S> FromRequest<S> for CompanyPayload
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mime = content_type(req.headers())?.ok_or_else(|| RestError::UnsupportedMediaType {
            content_type: "(none)".to_string(),
        })?;

        let representation =
            CompanyRepresentation::from_media_type(mime.essence_str()).ok_or_else(|| {
                RestError::UnsupportedMediaType {
                    content_type: mime.essence_str().to_string(),
                }
            })?;

        let bytes = read_body(req, state).await?;
        let body = serde_json::from_slice(&bytes)?;

        Ok(CompanyPayload {
            representation,
            body,
        })
    }
}

/// Axum extractor for a JSON request body.
///
/// Accepts `application/json` and any `+json` media type, including
/// `application/json-patch+json`. A missing content type is treated as JSON.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(mime) = content_type(req.headers())? {
            if !is_json(&mime) {
                return Err(RestError::UnsupportedMediaType {
                    content_type: mime.essence_str().to_string(),
                });
            }
        }

        let bytes = read_body(req, state).await?;
        Ok(JsonBody(serde_json::from_slice(&bytes)?))
    }
}
