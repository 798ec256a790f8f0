//! Liveness and storage reachability.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hsl_persistence::core::ListingStorage;
use serde_json::json;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::RestResult;
use crate::state::AppState;

/// Reports whether the listing store answers a lookup.
///
/// # HTTP Request
///
/// `GET [base]/health`
///
/// # Response
///
/// - `200 OK` - `status` is `healthy`
/// - `503 Service Unavailable` - the store failed; `status` is `unhealthy`
///   and `error` carries the cause
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: ListingStorage + 'static,
{
    debug!("Processing health check request");

    let storage = state.storage();
    let timestamp = chrono::Utc::now().to_rfc3339();

    // The nil id never names a company, so this only touches the index
    let response = match storage.company_exists(Uuid::nil()).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "backend": storage.backend_name(),
                "maxPageSize": state.config().max_page_size,
                "timestamp": timestamp
            })),
        ),
        Err(e) => {
            warn!(error = %e, "Listing store failed its health check");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "backend": storage.backend_name(),
                    "error": e.to_string(),
                    "timestamp": timestamp
                })),
            )
        }
    };

    Ok(response.into_response())
}
