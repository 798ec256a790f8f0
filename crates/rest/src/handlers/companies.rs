//! Company handlers.
//!
//! Implements the company resource:
//!
//! - `GET [base]/api/companies` - paged, ordered, filtered and shaped listing
//! - `POST [base]/api/companies` - create, payload variant chosen by `Content-Type`
//! - `DELETE [base]/api/companies` - delete every company
//! - `OPTIONS [base]/api/companies`
//! - `GET|POST|PUT|PATCH|DELETE [base]/api/companies/{company_id}`

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use hsl_persistence::core::{ListingStorage, already_exists, company_not_found, list_companies};
use hsl_persistence::types::{Company, Shaped};
use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{apply_patch, location};
use crate::error::RestResult;
use crate::extractors::{CompanyPayload, JsonBody, ResourceParameters, ResponseEnvelope};
use crate::models::{CompanyDto, CompanyForUpdate, Validate};
use crate::responses::{
    LinkAssembler, LinkedCollection, PaginationHeader, ShapedRecord, shape, shape_data,
};
use crate::state::AppState;

/// Allowed methods on the company collection.
pub const COMPANIES_ALLOW: &str = "GET,OPTIONS,POST,PUT";

/// Query accepted when reading one company.
#[derive(Debug, Default, Deserialize)]
pub struct CompanyFieldsQuery {
    /// Comma-separated view fields to return.
    #[serde(default)]
    pub fields: Option<String>,
}

/// Handler for the company listing.
///
/// # HTTP Request
///
/// `GET [base]/api/companies?pageNumber=&pageSize=&orderBy=&fields=&name=&location=&searchQuery=`
///
/// # Response
///
/// - `200 OK` - One page of shaped companies; the `X-Pagination` header
///   carries the page totals
/// - `400 Bad Request` - Unknown `orderBy` or `fields` member
///
/// With `Accept: application/vnd.marvin.hateoas+json` the body is
/// `{value, links}` and every company carries its own links. Otherwise the
/// body is the bare array and the neighbour page links travel in the header.
pub async fn list_companies_handler<S>(
    State(state): State<AppState<S>>,
    ResourceParameters(query): ResourceParameters,
    envelope: ResponseEnvelope,
) -> RestResult<Response>
where
    S: ListingStorage + 'static,
{
    debug!(
        page = query.page_number,
        size = query.page_size,
        order_by = %query.order_by,
        fields = query.fields(),
        linked = envelope.is_linked(),
        "Processing company listing request"
    );

    let page = list_companies(state.storage(), state.company_schema(), &query)
        .await
        .inspect_err(|e| {
            if e.is_client_error() {
                warn!(error = %e, "Rejected company listing query");
            }
        })?;

    let metadata = page.metadata;
    let companies: Vec<CompanyDto> = page.items.iter().map(CompanyDto::from).collect();
    let shaped = shape_data(&companies, state.company_schema().view(), query.fields())?;
    let links = LinkAssembler::new(state.base_url());

    if envelope.is_linked() {
        let value: Vec<ShapedRecord> = shaped
            .into_iter()
            .zip(&companies)
            .map(|(record, company)| {
                record.with_links(links.links_for_company(company.id, query.fields()))
            })
            .collect();
        let body = LinkedCollection {
            value,
            links: links.links_for_companies(&query, &metadata),
        };
        let pagination = PaginationHeader::new(metadata).to_header()?;
        return Ok((StatusCode::OK, [pagination], Json(body)).into_response());
    }

    let previous = metadata
        .previous_page()
        .map(|page| links.companies_page_uri(&query, page));
    let next = metadata
        .next_page()
        .map(|page| links.companies_page_uri(&query, page));
    let pagination = PaginationHeader::new(metadata)
        .with_links(previous, next)
        .to_header()?;

    Ok((StatusCode::OK, [pagination], Json(shaped)).into_response())
}

/// Handler for reading one company.
///
/// # HTTP Request
///
/// `GET [base]/api/companies/{company_id}?fields=`
///
/// # Response
///
/// - `200 OK` - The shaped company with its links
/// - `400 Bad Request` - Unknown `fields` member
/// - `404 Not Found` - No such company
pub async fn get_company_handler<S>(
    State(state): State<AppState<S>>,
    Path(company_id): Path<Uuid>,
    Query(params): Query<CompanyFieldsQuery>,
) -> RestResult<Response>
where
    S: ListingStorage + 'static,
{
    let fields = params.fields.as_deref().unwrap_or_default();
    debug!(company_id = %company_id, fields, "Processing company read request");

    // Reject bad projections before touching storage
    let view = state.company_schema().view();
    view.select(fields).inspect_err(|e| {
        warn!(error = %e, "Rejected company projection");
    })?;

    let company = state
        .storage()
        .get_company(company_id)
        .await?
        .ok_or_else(|| company_not_found(company_id))?;

    let links = LinkAssembler::new(state.base_url());
    let body = shape(&CompanyDto::from(&company), view, fields)?
        .with_links(links.links_for_company(company_id, fields));

    Ok((StatusCode::OK, Json(body)).into_response())
}

/// Handler for creating a company.
///
/// # HTTP Request
///
/// `POST [base]/api/companies`
///
/// The `Content-Type` selects the payload variant; see
/// [`CompanyRepresentation`](crate::models::CompanyRepresentation).
///
/// # Response
///
/// - `201 Created` - The company with its links; `Location` points at it
/// - `415 Unsupported Media Type` - Missing or unknown content type
/// - `422 Unprocessable Entity` - Validation failed
pub async fn create_company_handler<S>(
    State(state): State<AppState<S>>,
    payload: CompanyPayload,
) -> RestResult<Response>
where
    S: ListingStorage + 'static,
{
    let CompanyPayload {
        representation,
        body,
    } = payload;
    debug!(representation = ?representation, "Processing company create request");

    body.validate_as(representation)?;

    let company = state
        .storage()
        .add_company(body.into_company(representation))
        .await?;

    info!(company_id = %company.id, name = %company.name, "Company created");

    let links = LinkAssembler::new(state.base_url());
    let body = shape(
        &CompanyDto::from(&company),
        state.company_schema().view(),
        "",
    )?
    .with_links(links.links_for_company(company.id, ""));

    Ok((
        StatusCode::CREATED,
        [location(&links.company_uri(company.id))?],
        Json(body),
    )
        .into_response())
}

/// Handler for `POST` on an individual company.
///
/// Companies cannot be created at a client-chosen id.
///
/// # Response
///
/// - `409 Conflict` - The company exists
/// - `404 Not Found` - It does not
pub async fn block_company_creation_handler<S>(
    State(state): State<AppState<S>>,
    Path(company_id): Path<Uuid>,
) -> RestResult<Response>
where
    S: ListingStorage + 'static,
{
    debug!(company_id = %company_id, "Processing company create-at-id request");

    if state.storage().company_exists(company_id).await? {
        return Err(already_exists(Company::TYPE_NAME, company_id).into());
    }
    Err(company_not_found(company_id).into())
}

/// Handler for a full company update.
///
/// # Response
///
/// - `204 No Content` - Updated
/// - `404 Not Found` - No such company
/// - `422 Unprocessable Entity` - Validation failed
pub async fn update_company_handler<S>(
    State(state): State<AppState<S>>,
    Path(company_id): Path<Uuid>,
    JsonBody(update): JsonBody<CompanyForUpdate>,
) -> RestResult<Response>
where
    S: ListingStorage + 'static,
{
    debug!(company_id = %company_id, "Processing company update request");

    update.validate()?;

    let mut company = state.storage().require_company(company_id).await?;
    update.apply_to(&mut company);
    state.storage().update_company(&company).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Handler for a partial company update.
///
/// The body is a JSON Patch document applied to the company's update form.
///
/// # Response
///
/// - `204 No Content` - Updated
/// - `400 Bad Request` - Malformed patch document
/// - `404 Not Found` - No such company
/// - `422 Unprocessable Entity` - Patch could not be applied, or the result is invalid
pub async fn patch_company_handler<S>(
    State(state): State<AppState<S>>,
    Path(company_id): Path<Uuid>,
    JsonBody(patch): JsonBody<json_patch::Patch>,
) -> RestResult<Response>
where
    S: ListingStorage + 'static,
{
    debug!(
        company_id = %company_id,
        operations = patch.0.len(),
        "Processing company patch request"
    );

    let mut company = state.storage().require_company(company_id).await?;

    let patched = apply_patch(&CompanyForUpdate::from(&company), &patch)?;
    patched.validate()?;

    patched.apply_to(&mut company);
    state.storage().update_company(&company).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Handler for deleting one company and its products.
///
/// # Response
///
/// - `204 No Content` - Deleted
/// - `404 Not Found` - No such company
pub async fn delete_company_handler<S>(
    State(state): State<AppState<S>>,
    Path(company_id): Path<Uuid>,
) -> RestResult<Response>
where
    S: ListingStorage + 'static,
{
    debug!(company_id = %company_id, "Processing company delete request");

    state.storage().delete_company(company_id).await?;
    info!(company_id = %company_id, "Company was deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Handler for deleting every company.
pub async fn delete_companies_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: ListingStorage + 'static,
{
    debug!("Processing delete-all companies request");

    let removed = state.storage().delete_companies().await?;
    info!(removed, "All companies were deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Handler for `OPTIONS` on the company collection.
pub async fn companies_options_handler() -> impl IntoResponse {
    (StatusCode::OK, [(header::ALLOW, COMPANIES_ALLOW)])
}
