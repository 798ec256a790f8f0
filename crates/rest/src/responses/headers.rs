//! Response header generation.
//!
//! Provides the `X-Pagination` header carried by listing responses.

use http::{HeaderName, HeaderValue};
use hsl_persistence::types::PageMetadata;
use serde::Serialize;

use crate::error::{RestError, RestResult};

/// Name of the pagination header.
pub const X_PAGINATION: HeaderName = HeaderName::from_static("x-pagination");

/// Neighbour page links, present only on plain listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLinks {
    /// URI of the previous page, or null on the first page.
    pub previous_page_link: Option<String>,
    /// URI of the next page, or null on the last page.
    pub next_page_link: Option<String>,
}

/// Body of the `X-Pagination` header.
///
/// Plain listings include the neighbour page links; hypermedia listings
/// carry those links in the body instead and omit them here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationHeader {
    #[serde(flatten)]
    metadata: PageMetadata,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    links: Option<PageLinks>,
}

impl PaginationHeader {
    /// Creates a header without page links.
    pub fn new(metadata: PageMetadata) -> Self {
        Self {
            metadata,
            links: None,
        }
    }

    /// Adds the neighbour page links.
    pub fn with_links(mut self, previous: Option<String>, next: Option<String>) -> Self {
        self.links = Some(PageLinks {
            previous_page_link: previous,
            next_page_link: next,
        });
        self
    }

    /// Returns the page metadata.
    pub fn metadata(&self) -> &PageMetadata {
        &self.metadata
    }

    /// Serializes the header as JSON.
    pub fn to_header_value(&self) -> RestResult<HeaderValue> {
        let json = serde_json::to_string(self).map_err(|e| RestError::InternalError {
            message: format!("Could not serialize X-Pagination header: {}", e),
        })?;
        HeaderValue::from_str(&json).map_err(|e| RestError::InternalError {
            message: format!("X-Pagination header is not a valid header value: {}", e),
        })
    }

    /// Returns the `(name, value)` pair for a response.
    pub fn to_header(&self) -> RestResult<(HeaderName, HeaderValue)> {
        Ok((X_PAGINATION, self.to_header_value()?))
    }
}
