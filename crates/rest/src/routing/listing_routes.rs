//! Listing route configuration.
//!
//! Defines all routes for the listing API.

use axum::{
    Router,
    routing::{delete, get, options, patch, post, put},
};
use hsl_persistence::core::ListingStorage;

use crate::handlers;
use crate::state::AppState;

/// Creates all listing API routes.
///
/// # Routes
///
/// ## System
/// - `GET /health` - Health check
/// - `GET /api` - Root links
///
/// ## Companies
/// - `GET|HEAD /api/companies` - Listing
/// - `POST /api/companies` - Create
/// - `DELETE /api/companies` - Delete all
/// - `OPTIONS /api/companies` - Allowed methods
/// - `GET|POST|PUT|PATCH|DELETE /api/companies/{company_id}`
///
/// ## Products
/// - `GET|POST|OPTIONS /api/companies/{company_id}/products`
/// - `GET|PUT|PATCH|DELETE /api/companies/{company_id}/products/{product_id}`
///
/// ## Company collections
/// - `POST /api/companycollections` - Bulk create
/// - `GET /api/companycollections/({ids})` - Bulk read
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: ListingStorage + 'static,
{
    Router::new()
        // System routes
        .route("/health", get(handlers::health_handler::<S>))
        .route("/api", get(handlers::root_handler::<S>))
        // Company routes
        .route("/api/companies", get(handlers::list_companies_handler::<S>))
        .route("/api/companies", post(handlers::create_company_handler::<S>))
        .route(
            "/api/companies",
            delete(handlers::delete_companies_handler::<S>),
        )
        .route(
            "/api/companies",
            options(handlers::companies_options_handler),
        )
        .route(
            "/api/companies/{company_id}",
            get(handlers::get_company_handler::<S>),
        )
        .route(
            "/api/companies/{company_id}",
            post(handlers::block_company_creation_handler::<S>),
        )
        .route(
            "/api/companies/{company_id}",
            put(handlers::update_company_handler::<S>),
        )
        .route(
            "/api/companies/{company_id}",
            patch(handlers::patch_company_handler::<S>),
        )
        .route(
            "/api/companies/{company_id}",
            delete(handlers::delete_company_handler::<S>),
        )
        // Product routes
        .route(
            "/api/companies/{company_id}/products",
            get(handlers::list_products_handler::<S>),
        )
        .route(
            "/api/companies/{company_id}/products",
            post(handlers::create_product_handler::<S>),
        )
        .route(
            "/api/companies/{company_id}/products",
            options(handlers::products_options_handler),
        )
        .route(
            "/api/companies/{company_id}/products/{product_id}",
            get(handlers::get_product_handler::<S>),
        )
        .route(
            "/api/companies/{company_id}/products/{product_id}",
            put(handlers::update_product_handler::<S>),
        )
        .route(
            "/api/companies/{company_id}/products/{product_id}",
            patch(handlers::patch_product_handler::<S>),
        )
        .route(
            "/api/companies/{company_id}/products/{product_id}",
            delete(handlers::delete_product_handler::<S>),
        )
        // Company collection routes
        .route(
            "/api/companycollections",
            post(handlers::create_company_collection_handler::<S>),
        )
        .route(
            "/api/companycollections/{ids}",
            get(handlers::get_company_collection_handler::<S>),
        )
        // State
        .with_state(state)
}
