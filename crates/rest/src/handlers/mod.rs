//! HTTP request handlers for the listing API.
//!
//! - [`root`] - API root links
//! - [`companies`] - Company listing, reads and writes
//! - [`products`] - Products of one company
//! - [`company_collections`] - Bulk company creation and retrieval
//! - [`health`] - Health check endpoint

pub mod companies;
pub mod company_collections;
pub mod health;
pub mod products;
pub mod root;

pub use companies::{
    block_company_creation_handler, companies_options_handler, create_company_handler,
    delete_companies_handler, delete_company_handler, get_company_handler,
    list_companies_handler, patch_company_handler, update_company_handler,
};
pub use company_collections::{
    create_company_collection_handler, get_company_collection_handler,
};
pub use health::health_handler;
pub use products::{
    create_product_handler, delete_product_handler, get_product_handler, list_products_handler,
    patch_product_handler, products_options_handler, update_product_handler,
};
pub use root::root_handler;

use axum::http::{HeaderValue, header};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{RestError, RestResult};

/// Applies a JSON Patch document to the update form of a resource.
///
/// The patched document must still deserialize into `T`; a patch that
/// cannot be applied is reported under the `patch` member with 422.
pub(crate) fn apply_patch<T>(document: &T, patch: &json_patch::Patch) -> RestResult<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(document).map_err(|e| RestError::InternalError {
        message: format!("Could not serialize patch target: {}", e),
    })?;

    json_patch::patch(&mut value, patch)
        .map_err(|e| RestError::unprocessable("patch", e.to_string()))?;

    serde_json::from_value(value).map_err(|e| RestError::unprocessable("patch", e.to_string()))
}

/// Builds a `Location` header value.
pub(crate) fn location(uri: &str) -> RestResult<(header::HeaderName, HeaderValue)> {
    let value = HeaderValue::from_str(uri).map_err(|e| RestError::InternalError {
        message: format!("Invalid Location header: {}", e),
    })?;
    Ok((header::LOCATION, value))
}
