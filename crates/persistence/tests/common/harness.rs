//! Storage wrappers and backend constructors for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use hsl_persistence::backends::memory::InMemoryBackend;
use hsl_persistence::core::ListingStorage;
use hsl_persistence::error::StorageResult;
use hsl_persistence::types::{Company, CompanyFilter, Product};

/// Wraps a backend and counts how many times companies were read.
pub struct CountingStorage<S> {
    inner: S,
    reads: AtomicUsize,
}

impl<S: ListingStorage> CountingStorage<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            reads: AtomicUsize::new(0),
        }
    }

    /// Number of company reads observed so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<S: ListingStorage> ListingStorage for CountingStorage<S> {
    fn backend_name(&self) -> &'static str {
        self.inner.backend_name()
    }

    async fn filter_companies(&self, filter: &CompanyFilter) -> StorageResult<Vec<Company>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.filter_companies(filter).await
    }

    async fn get_company(&self, id: Uuid) -> StorageResult<Option<Company>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get_company(id).await
    }

    async fn get_companies(&self, ids: &[Uuid]) -> StorageResult<Vec<Company>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get_companies(ids).await
    }

    async fn add_company(&self, company: Company) -> StorageResult<Company> {
        self.inner.add_company(company).await
    }

    async fn update_company(&self, company: &Company) -> StorageResult<Company> {
        self.inner.update_company(company).await
    }

    async fn delete_company(&self, id: Uuid) -> StorageResult<()> {
        self.inner.delete_company(id).await
    }

    async fn delete_companies(&self) -> StorageResult<usize> {
        self.inner.delete_companies().await
    }

    async fn get_products_for_company(&self, company_id: Uuid) -> StorageResult<Vec<Product>> {
        self.inner.get_products_for_company(company_id).await
    }

    async fn get_product(&self, company_id: Uuid, id: Uuid) -> StorageResult<Option<Product>> {
        self.inner.get_product(company_id, id).await
    }

    async fn add_product(&self, product: Product) -> StorageResult<Product> {
        self.inner.add_product(product).await
    }

    async fn update_product(&self, product: &Product) -> StorageResult<Product> {
        self.inner.update_product(product).await
    }

    async fn delete_product(&self, company_id: Uuid, id: Uuid) -> StorageResult<()> {
        self.inner.delete_product(company_id, id).await
    }
}

/// Creates an in-memory backend holding the given companies.
pub fn memory_backend(companies: Vec<Company>) -> InMemoryBackend {
    InMemoryBackend::with_companies(companies)
}

/// Creates a schema-initialized SQLite backend holding the given companies.
#[cfg(feature = "sqlite")]
pub async fn sqlite_backend(
    companies: Vec<Company>,
) -> hsl_persistence::backends::sqlite::SqliteBackend {
    let backend = hsl_persistence::backends::sqlite::SqliteBackend::in_memory()
        .expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to initialize schema");
    for company in companies {
        backend
            .add_company(company)
            .await
            .expect("Failed to seed company");
    }
    backend
}
