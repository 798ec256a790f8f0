//! API root handler.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hsl_persistence::core::ListingStorage;
use tracing::debug;

use crate::extractors::ResponseEnvelope;
use crate::responses::LinkAssembler;
use crate::state::AppState;

/// Handler for the API root.
///
/// # HTTP Request
///
/// `GET [base]/api`
///
/// # Response
///
/// - `200 OK` - The root links, when the hypermedia media type is accepted
/// - `204 No Content` - Otherwise
pub async fn root_handler<S>(
    State(state): State<AppState<S>>,
    envelope: ResponseEnvelope,
) -> Response
where
    S: ListingStorage + 'static,
{
    debug!(linked = envelope.is_linked(), "Processing root request");

    if !envelope.is_linked() {
        return StatusCode::NO_CONTENT.into_response();
    }

    let links = LinkAssembler::new(state.base_url()).links_for_root();
    (StatusCode::OK, Json(links)).into_response()
}
