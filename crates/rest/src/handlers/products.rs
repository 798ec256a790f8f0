//! Product handlers.
//!
//! Products live under their company; every operation first requires the
//! company to exist.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use hsl_persistence::core::{ListingStorage, list_products, product_not_found};
use hsl_persistence::types::{Company, DEFAULT_ORDER_BY, FieldAccessor, Product};
use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{apply_patch, location};
use crate::error::RestResult;
use crate::extractors::JsonBody;
use crate::models::{ProductDto, ProductForCreation, ProductForUpdate, Validate, ValidationErrors};
use crate::responses::{LinkAssembler, LinkedCollection, ShapedRecord, shape_record};
use crate::state::AppState;

/// Allowed methods on a product collection.
pub const PRODUCTS_ALLOW: &str = "GET,OPTIONS,POST";

const PRODUCT_NAMED_AFTER_COMPANY: &str = "Please enter a proper name for the product.";

/// Query accepted by the product listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    /// Ordering expression over the product view.
    #[serde(default = "default_order_by")]
    pub order_by: String,
}

impl Default for ProductListQuery {
    fn default() -> Self {
        Self {
            order_by: default_order_by(),
        }
    }
}

fn default_order_by() -> String {
    DEFAULT_ORDER_BY.to_string()
}

/// Validates a product form, adding the rule that a product may not share
/// its company's name.
fn validate_for_company<T: Validate>(
    form: &T,
    name: Option<&str>,
    company: &Company,
) -> Result<(), ValidationErrors> {
    let mut errors = match form.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };
    if name.is_some_and(|n| n.trim().eq_ignore_ascii_case(company.name.trim())) {
        errors.add("product", PRODUCT_NAMED_AFTER_COMPANY);
    }
    errors.into_result()
}

/// Shapes a product through every view field and attaches its links.
fn product_body(
    links: &LinkAssembler,
    view: &[FieldAccessor<ProductDto>],
    product: &Product,
) -> ShapedRecord {
    shape_record(&ProductDto::from(product), view)
        .with_links(links.links_for_product(product.company_id, product.id))
}

/// Handler for a company's product listing.
///
/// # HTTP Request
///
/// `GET [base]/api/companies/{company_id}/products?orderBy=`
///
/// # Response
///
/// - `200 OK` - `{value, links}`, each product with its own links
/// - `400 Bad Request` - Unknown `orderBy` member
/// - `404 Not Found` - No such company
pub async fn list_products_handler<S>(
    State(state): State<AppState<S>>,
    Path(company_id): Path<Uuid>,
    Query(params): Query<ProductListQuery>,
) -> RestResult<Response>
where
    S: ListingStorage + 'static,
{
    debug!(company_id = %company_id, order_by = %params.order_by, "Processing product listing request");

    let products = list_products(
        state.storage(),
        state.product_schema(),
        company_id,
        &params.order_by,
    )
    .await
    .inspect_err(|e| {
        if e.is_client_error() {
            warn!(error = %e, "Rejected product listing query");
        }
    })?;

    let links = LinkAssembler::new(state.base_url());
    let view = state.product_schema().view().fields();
    let body = LinkedCollection {
        value: products
            .iter()
            .map(|p| product_body(&links, view, p))
            .collect(),
        links: links.links_for_products(company_id),
    };

    Ok((StatusCode::OK, Json(body)).into_response())
}

/// Handler for reading one product.
///
/// # Response
///
/// - `200 OK` - The product with its links
/// - `404 Not Found` - No such company, or no such product for it
pub async fn get_product_handler<S>(
    State(state): State<AppState<S>>,
    Path((company_id, product_id)): Path<(Uuid, Uuid)>,
) -> RestResult<Response>
where
    S: ListingStorage + 'static,
{
    debug!(company_id = %company_id, product_id = %product_id, "Processing product read request");

    state.storage().require_company(company_id).await?;
    let product = state
        .storage()
        .get_product(company_id, product_id)
        .await?
        .ok_or_else(|| product_not_found(product_id))?;

    let links = LinkAssembler::new(state.base_url());
    let view = state.product_schema().view().fields();
    Ok((StatusCode::OK, Json(product_body(&links, view, &product))).into_response())
}

/// Handler for creating a product.
///
/// # Response
///
/// - `201 Created` - The product with its links; `Location` points at it
/// - `404 Not Found` - No such company
/// - `422 Unprocessable Entity` - Validation failed, or the name is the company's
pub async fn create_product_handler<S>(
    State(state): State<AppState<S>>,
    Path(company_id): Path<Uuid>,
    JsonBody(form): JsonBody<ProductForCreation>,
) -> RestResult<Response>
where
    S: ListingStorage + 'static,
{
    debug!(company_id = %company_id, "Processing product create request");

    let company = state.storage().require_company(company_id).await?;
    validate_for_company(&form, form.name.as_deref(), &company)?;

    let product = state
        .storage()
        .add_product(form.into_product(company_id))
        .await?;
    info!(company_id = %company_id, product_id = %product.id, "Product created");

    created(&state, &product)
}

/// Handler for a full product update.
///
/// When upserting is enabled a missing product is created at the given id.
///
/// # Response
///
/// - `204 No Content` - Updated
/// - `201 Created` - Upserted
/// - `404 Not Found` - No such company, or no such product with upserting disabled
/// - `422 Unprocessable Entity` - Validation failed, or the name is the company's
pub async fn update_product_handler<S>(
    State(state): State<AppState<S>>,
    Path((company_id, product_id)): Path<(Uuid, Uuid)>,
    JsonBody(form): JsonBody<ProductForUpdate>,
) -> RestResult<Response>
where
    S: ListingStorage + 'static,
{
    debug!(company_id = %company_id, product_id = %product_id, "Processing product update request");

    let company = state.storage().require_company(company_id).await?;
    validate_for_company(&form, form.name.as_deref(), &company)?;

    let Some(mut product) = state.storage().get_product(company_id, product_id).await? else {
        if !state.upsert_enabled() {
            return Err(product_not_found(product_id).into());
        }

        let mut product = Product::with_id(product_id, company_id, "");
        form.apply_to(&mut product);
        let product = state.storage().add_product(product).await?;
        info!(company_id = %company_id, product_id = %product.id, "Product upserted");
        return created(&state, &product);
    };

    form.apply_to(&mut product);
    state.storage().update_product(&product).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Handler for a partial product update.
///
/// # Response
///
/// - `204 No Content` - Updated
/// - `400 Bad Request` - Malformed patch document
/// - `404 Not Found` - No such company or product
/// - `422 Unprocessable Entity` - Patch could not be applied, or the result is invalid
pub async fn patch_product_handler<S>(
    State(state): State<AppState<S>>,
    Path((company_id, product_id)): Path<(Uuid, Uuid)>,
    JsonBody(patch): JsonBody<json_patch::Patch>,
) -> RestResult<Response>
where
    S: ListingStorage + 'static,
{
    debug!(company_id = %company_id, product_id = %product_id, "Processing product patch request");

    let company = state.storage().require_company(company_id).await?;
    let mut product = state
        .storage()
        .get_product(company_id, product_id)
        .await?
        .ok_or_else(|| product_not_found(product_id))?;

    let patched = apply_patch(&ProductForUpdate::from(&product), &patch)?;
    validate_for_company(&patched, patched.name.as_deref(), &company)?;

    patched.apply_to(&mut product);
    state.storage().update_product(&product).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Handler for deleting a product.
///
/// # Response
///
/// - `204 No Content` - Deleted
/// - `404 Not Found` - No such company or product
pub async fn delete_product_handler<S>(
    State(state): State<AppState<S>>,
    Path((company_id, product_id)): Path<(Uuid, Uuid)>,
) -> RestResult<Response>
where
    S: ListingStorage + 'static,
{
    debug!(company_id = %company_id, product_id = %product_id, "Processing product delete request");

    state.storage().require_company(company_id).await?;
    let product = state
        .storage()
        .get_product(company_id, product_id)
        .await?
        .ok_or_else(|| product_not_found(product_id))?;

    state.storage().delete_product(company_id, product_id).await?;
    info!("Product {} was deleted.", product.name);

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Handler for `OPTIONS` on a product collection.
pub async fn products_options_handler() -> impl IntoResponse {
    (StatusCode::OK, [(header::ALLOW, PRODUCTS_ALLOW)])
}

fn created<S>(state: &AppState<S>, product: &Product) -> RestResult<Response>
where
    S: ListingStorage,
{
    let links = LinkAssembler::new(state.base_url());
    let view = state.product_schema().view().fields();
    let uri = links.product_uri(product.company_id, product.id);
    let body = product_body(&links, view, product);

    Ok((StatusCode::CREATED, [location(&uri)?], Json(body)).into_response())
}
