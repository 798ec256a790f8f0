//! Axum extractors for listing requests.
//!
//! This module provides custom Axum extractors for common listing patterns:
//!
//! - [`ResourceParameters`] - Paging, ordering, projection and filter parameters
//! - [`ResponseEnvelope`] - Plain or hypermedia envelope, from `Accept`
//! - [`CompanyPayload`] - Company creation body, variant chosen by `Content-Type`
//! - [`JsonBody`] - JSON request bodies with problem-style rejections
//! - [`IdList`] - Parenthesized company id lists

mod id_list;
mod media_type;
mod resource_parameters;

pub use id_list::{IdList, IdListError};
pub use media_type::{CompanyPayload, HATEOAS_MEDIA_TYPE, JsonBody, ResponseEnvelope};
pub use resource_parameters::ResourceParameters;
