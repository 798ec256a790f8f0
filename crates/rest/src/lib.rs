//! # hsl-rest - Healthcare Software Listing REST API
//!
//! This crate exposes the company and product listing over HTTP. Listings
//! are paged, ordered through the property mapping registry, filtered,
//! shaped to a client-chosen field subset and, on request, decorated with
//! hypermedia links.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hsl_rest::{create_app_with_config, ServerConfig};
//! use hsl_persistence::backends::memory::InMemoryBackend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::default();
//!     let app = create_app_with_config(InMemoryBackend::new(), config)?;
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Interaction | HTTP Method | URL Pattern |
//! |------------|-------------|-------------|
//! | root | GET | `/api` |
//! | list companies | GET/HEAD | `/api/companies` |
//! | create company | POST | `/api/companies` |
//! | delete all companies | DELETE | `/api/companies` |
//! | read company | GET | `/api/companies/{id}` |
//! | update company | PUT/PATCH | `/api/companies/{id}` |
//! | delete company | DELETE | `/api/companies/{id}` |
//! | products | GET/POST | `/api/companies/{id}/products` |
//! | product | GET/PUT/PATCH/DELETE | `/api/companies/{id}/products/{productId}` |
//! | bulk create | POST | `/api/companycollections` |
//! | bulk read | GET | `/api/companycollections/({ids})` |
//! | health | GET | `/health` |
//!
//! ## Listing Parameters
//!
//! `pageNumber`, `pageSize` (at most 10), `orderBy` (default `Name`),
//! `fields`, `name`, `location` and `searchQuery`. Page totals travel in the
//! `X-Pagination` response header.
//!
//! ## Media Types
//!
//! - `Accept: application/vnd.marvin.hateoas+json` - Wrap listings as
//!   `{value, links}` with per-record links
//! - `Content-Type: application/vnd.marvin.company.full+json` and siblings -
//!   Choose the company creation payload variant
//!
//! ## Error Handling
//!
//! Errors are returned as JSON `{status, title, detail}` bodies:
//!
//! | HTTP Status | Cause |
//! |-------------|-------|
//! | 400 | Unknown ordering or projection field, malformed request |
//! | 404 | Company or product not found |
//! | 409 | Company already exists |
//! | 415 | Unsupported content type |
//! | 422 | Validation failed; body carries `errors` |
//! | 500 | Storage failure |
//!
//! ## Configuration
//!
//! The server is configured via command line or environment variables:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `REST_SERVER_PORT` | 8080 | Server port |
//! | `REST_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `REST_LOG_LEVEL` | info | Log level (error, warn, info, debug, trace) |
//! | `REST_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `REST_ENABLE_CORS` | true | Enable CORS |
//! | `REST_BASE_URL` | http://localhost:8080 | Base URL for links |
//! | `REST_STORAGE_BACKEND` | memory | `memory` or `sqlite` |
//! | `REST_MAX_PAGE_SIZE` | 10 | Largest page a client may request |
//! | `REST_ENABLE_UPSERT` | false | Let PUT create missing products |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and their JSON responses
//! - [`config`] - Server configuration
//! - [`state`] - Application state (storage, configuration, listing schemas)
//! - [`models`] - Request and response representations, validation
//! - [`handlers`] - HTTP request handlers
//! - [`extractors`] - Axum extractors for listing parameters and media types
//! - [`responses`] - Field shaping, links and headers
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::{ServerConfig, StorageBackendMode};
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use hsl_persistence::core::ListingStorage;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
///
/// # Errors
///
/// Fails if the listing registry lacks a required mapping.
pub fn create_app<S>(storage: S) -> anyhow::Result<Router>
where
    S: ListingStorage + 'static,
{
    create_app_with_config(storage, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Arguments
///
/// * `storage` - The storage backend to use
/// * `config` - Server configuration
///
/// # Errors
///
/// Fails if the listing registry lacks a required mapping.
///
/// # Example
///
/// ```rust,ignore
/// use hsl_rest::{create_app_with_config, ServerConfig};
/// use hsl_persistence::backends::memory::InMemoryBackend;
///
/// let config = ServerConfig {
///     port: 3000,
///     enable_upsert: true,
///     ..Default::default()
/// };
/// let app = create_app_with_config(InMemoryBackend::new(), config)?;
/// ```
pub fn create_app_with_config<S>(storage: S, config: ServerConfig) -> anyhow::Result<Router>
where
    S: ListingStorage + 'static,
{
    info!(
        "Creating REST API server with backend: {}",
        storage.backend_name()
    );

    let state = AppState::try_new(Arc::new(storage), config.clone())?;

    let router = routing::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ))
        .layer(DefaultBodyLimit::max(config.max_body_size));

    // Add CORS if enabled
    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    Ok(router.layer(service_builder))
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    // Clients read the page totals from this header
    cors.expose_headers([responses::X_PAGINATION])
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level`.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "hsl_rest={level},hsl_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
