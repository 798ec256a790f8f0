//! REST API test harness.
//!
//! Builds a [`TestServer`] over the full router with a storage backend the
//! test can still reach for seeding and inspection.

use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use uuid::Uuid;

use hsl_persistence::backends::memory::InMemoryBackend;
use hsl_persistence::core::ListingStorage;
use hsl_persistence::error::{BackendError, StorageResult};
use hsl_persistence::types::{Company, CompanyFilter, Product};
use hsl_rest::{AppState, ServerConfig};

/// Base URL the test configuration builds links from.
pub const BASE_URL: &str = "http://localhost";

/// A test server and the backend behind it.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_listing() {
///     let app = TestApp::with_companies(fixtures::numbered_companies());
///     let response = app.server.get("/api/companies").await;
///     assert_eq!(response.status_code(), 200);
/// }
/// ```
pub struct TestApp<S = InMemoryBackend>
where
    S: ListingStorage + 'static,
{
    /// The test server instance.
    pub server: TestServer,

    /// The storage backend.
    pub backend: Arc<S>,

    /// Server configuration.
    pub config: ServerConfig,
}

impl TestApp<InMemoryBackend> {
    /// Creates a server over an empty in-memory backend.
    pub fn new() -> Self {
        Self::with_backend(InMemoryBackend::new(), ServerConfig::for_testing())
    }

    /// Creates a server over an in-memory backend seeded with `companies`.
    pub fn with_companies(companies: Vec<Company>) -> Self {
        Self::with_backend(
            InMemoryBackend::with_companies(companies),
            ServerConfig::for_testing(),
        )
    }

    /// Creates a server with upserting enabled.
    pub fn with_upsert(companies: Vec<Company>) -> Self {
        let config = ServerConfig {
            enable_upsert: true,
            ..ServerConfig::for_testing()
        };
        Self::with_backend(InMemoryBackend::with_companies(companies), config)
    }
}

impl<S> TestApp<S>
where
    S: ListingStorage + 'static,
{
    /// Creates a server over any backend.
    pub fn with_backend(backend: S, config: ServerConfig) -> Self {
        let backend = Arc::new(backend);
        let state =
            AppState::try_new(Arc::clone(&backend), config.clone()).expect("Failed to build state");
        let app = hsl_rest::routing::create_routes(state);
        let server = TestServer::new(app).expect("Failed to create test server");

        Self {
            server,
            backend,
            config,
        }
    }
}

/// A backend whose every operation fails as unavailable.
#[derive(Debug, Default)]
pub struct FailingStorage;

fn unavailable<T>() -> StorageResult<T> {
    Err(BackendError::Unavailable {
        backend_name: "failing".to_string(),
        message: "backend is down".to_string(),
    }
    .into())
}

#[async_trait]
impl ListingStorage for FailingStorage {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    async fn filter_companies(&self, _filter: &CompanyFilter) -> StorageResult<Vec<Company>> {
        unavailable()
    }

    async fn get_company(&self, _id: Uuid) -> StorageResult<Option<Company>> {
        unavailable()
    }

    async fn get_companies(&self, _ids: &[Uuid]) -> StorageResult<Vec<Company>> {
        unavailable()
    }

    async fn add_company(&self, _company: Company) -> StorageResult<Company> {
        unavailable()
    }

    async fn update_company(&self, _company: &Company) -> StorageResult<Company> {
        unavailable()
    }

    async fn delete_company(&self, _id: Uuid) -> StorageResult<()> {
        unavailable()
    }

    async fn delete_companies(&self) -> StorageResult<usize> {
        unavailable()
    }

    async fn get_products_for_company(&self, _company_id: Uuid) -> StorageResult<Vec<Product>> {
        unavailable()
    }

    async fn get_product(&self, _company_id: Uuid, _id: Uuid) -> StorageResult<Option<Product>> {
        unavailable()
    }

    async fn add_product(&self, _product: Product) -> StorageResult<Product> {
        unavailable()
    }

    async fn update_product(&self, _product: &Product) -> StorageResult<Product> {
        unavailable()
    }

    async fn delete_product(&self, _company_id: Uuid, _id: Uuid) -> StorageResult<()> {
        unavailable()
    }
}
