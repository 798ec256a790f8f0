//! Listing parameter extractor.
//!
//! Extracts paging, ordering, projection and filter parameters for the
//! company listing and applies the configured defaults and limits.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use hsl_persistence::core::ListingStorage;
use hsl_persistence::types::{CompanyFilter, ResourceQuery};
use serde::Deserialize;

use crate::error::RestError;
use crate::state::AppState;

/// Axum extractor for company listing parameters.
///
/// Missing values fall back to the server configuration; the page size is
/// clamped to `1..=max_page_size` and the page number to at least 1.
///
/// # Example
///
/// ```rust,ignore
/// use hsl_rest::extractors::ResourceParameters;
///
/// async fn list_handler(ResourceParameters(query): ResourceParameters) {
///     let page = query.page_number;
///     let order = &query.order_by;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ResourceParameters(pub ResourceQuery);

/// Raw query string parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParametersQuery {
    page_number: Option<usize>,
    page_size: Option<usize>,
    order_by: Option<String>,
    fields: Option<String>,
    name: Option<String>,
    location: Option<String>,
    search_query: Option<String>,
}

impl ResourceParameters {
    /// Consumes the extractor and returns the query.
    pub fn into_inner(self) -> ResourceQuery {
        self.0
    }
}

impl ParametersQuery {
    fn into_resource_query(
        self,
        default_page_size: usize,
        max_page_size: usize,
        default_order_by: &str,
    ) -> ResourceQuery {
        let mut query = ResourceQuery::new()
            .with_page(
                self.page_number.unwrap_or(1),
                self.page_size.unwrap_or(default_page_size),
                max_page_size,
            )
            .with_order_by(self.order_by.unwrap_or_else(|| default_order_by.to_string()))
            .with_filter(CompanyFilter {
                name: self.name,
                location: self.location,
                search_query: self.search_query,
            });

        if let Some(fields) = self.fields {
            query = query.with_fields(fields);
        }
        query
    }
}

impl<S> FromRequestParts<AppState<S>> for ResourceParameters
where
    S: ListingStorage + 'static,
{
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<ParametersQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| RestError::BadRequest {
                message: format!("Invalid query parameters: {}", e.body_text()),
            })?;

        let config = state.config();
        Ok(ResourceParameters(params.into_resource_query(
            config.default_page_size,
            config.max_page_size,
            &config.default_order_by,
        )))
    }
}
