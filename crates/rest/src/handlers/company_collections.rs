//! Company collection handlers.
//!
//! A company collection is a set of companies created in one request and
//! addressed afterwards as `(id1,id2,...)`.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hsl_persistence::core::{ListingStorage, company_not_found};
use tracing::{debug, info};

use super::location;
use crate::error::{RestError, RestResult};
use crate::extractors::{IdList, JsonBody};
use crate::models::{CompanyDto, CompanyForCreation, CompanyRepresentation, validate_each};
use crate::responses::{LinkAssembler, shape_data};
use crate::state::AppState;

/// Handler for bulk company creation.
///
/// Every company is validated before any is stored.
///
/// # HTTP Request
///
/// `POST [base]/api/companycollections`
///
/// # Response
///
/// - `201 Created` - The created companies; `Location` addresses them as a set
/// - `400 Bad Request` - Empty list
/// - `422 Unprocessable Entity` - Any company failed validation, keyed `[index].member`
pub async fn create_company_collection_handler<S>(
    State(state): State<AppState<S>>,
    JsonBody(forms): JsonBody<Vec<CompanyForCreation>>,
) -> RestResult<Response>
where
    S: ListingStorage + 'static,
{
    debug!(count = forms.len(), "Processing company collection create request");

    if forms.is_empty() {
        return Err(RestError::BadRequest {
            message: "A company collection needs at least one company.".to_string(),
        });
    }

    validate_each(&forms).into_result()?;

    let mut companies = Vec::with_capacity(forms.len());
    for form in forms {
        let company = state
            .storage()
            .add_company(form.into_company(CompanyRepresentation::Full))
            .await?;
        companies.push(CompanyDto::from(&company));
    }

    let ids: Vec<_> = companies.iter().map(|c| c.id).collect();
    info!(count = ids.len(), "Company collection created");

    let links = LinkAssembler::new(state.base_url());
    let body = shape_data(&companies, state.company_schema().view(), "")?;

    Ok((
        StatusCode::CREATED,
        [location(&links.company_collection_uri(&ids))?],
        Json(body),
    )
        .into_response())
}

/// Handler for reading a company collection.
///
/// # HTTP Request
///
/// `GET [base]/api/companycollections/({ids})`
///
/// # Response
///
/// - `200 OK` - Every requested company, in request order
/// - `400 Bad Request` - Malformed or empty id list
/// - `404 Not Found` - Any id does not exist
pub async fn get_company_collection_handler<S>(
    State(state): State<AppState<S>>,
    ids: IdList,
) -> RestResult<Response>
where
    S: ListingStorage + 'static,
{
    debug!(count = ids.ids().len(), "Processing company collection read request");

    let found = state.storage().get_companies(ids.ids()).await?;

    let mut companies = Vec::with_capacity(ids.ids().len());
    for id in ids.ids() {
        let company = found
            .iter()
            .find(|c| c.id == *id)
            .ok_or_else(|| company_not_found(*id))?;
        companies.push(CompanyDto::from(company));
    }

    let body = shape_data(&companies, state.company_schema().view(), "")?;
    Ok((StatusCode::OK, Json(body)).into_response())
}
