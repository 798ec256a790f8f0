//! Core listing storage trait.
//!
//! This module defines the [`ListingStorage`] trait, the collaborator the
//! listing pipeline reads from. Backends apply the equality and substring
//! filters of a [`CompanyFilter`]; ordering and paging happen afterwards in
//! the pipeline so every backend sorts the same way.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{ResourceError, StorageError, StorageResult};
use crate::types::{Company, CompanyFilter, Product, Shaped};

/// Storage for companies and their products.
///
/// Returned companies never carry their products; use
/// [`get_products_for_company`](ListingStorage::get_products_for_company).
///
/// # Example
///
/// ```ignore
/// use hsl_persistence::core::ListingStorage;
/// use hsl_persistence::types::{Company, CompanyFilter};
///
/// async fn example<S: ListingStorage>(storage: &S) -> StorageResult<()> {
///     let company = storage
///         .add_company(Company::new("Acme Health", chrono::Utc::now()))
///         .await?;
///
///     let found = storage
///         .filter_companies(&CompanyFilter {
///             search_query: Some("acme".to_string()),
///             ..Default::default()
///         })
///         .await?;
///     assert_eq!(found[0].id, company.id);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait ListingStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Returns every company matching the filter, in insertion order.
    async fn filter_companies(&self, filter: &CompanyFilter) -> StorageResult<Vec<Company>>;

    /// Reads a company by ID.
    async fn get_company(&self, id: Uuid) -> StorageResult<Option<Company>>;

    /// Reads the companies with the given IDs. Unknown IDs are skipped.
    async fn get_companies(&self, ids: &[Uuid]) -> StorageResult<Vec<Company>>;

    /// Stores a new company together with any products it carries.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(AlreadyExists)` - A company with this ID exists
    async fn add_company(&self, company: Company) -> StorageResult<Company>;

    /// Replaces the stored fields of a company.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - No company with this ID
    async fn update_company(&self, company: &Company) -> StorageResult<Company>;

    /// Deletes a company and its products.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - No company with this ID
    async fn delete_company(&self, id: Uuid) -> StorageResult<()>;

    /// Deletes every company and product. Returns the number of companies removed.
    async fn delete_companies(&self) -> StorageResult<usize>;

    /// Returns the products of a company, in insertion order.
    async fn get_products_for_company(&self, company_id: Uuid) -> StorageResult<Vec<Product>>;

    /// Reads a product belonging to a company.
    async fn get_product(&self, company_id: Uuid, id: Uuid) -> StorageResult<Option<Product>>;

    /// Stores a new product.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - The owning company does not exist
    /// * `StorageError::Resource(AlreadyExists)` - A product with this ID exists
    async fn add_product(&self, product: Product) -> StorageResult<Product>;

    /// Replaces the stored fields of a product.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - No such product for the company
    async fn update_product(&self, product: &Product) -> StorageResult<Product>;

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - No such product for the company
    async fn delete_product(&self, company_id: Uuid, id: Uuid) -> StorageResult<()>;

    /// Checks whether a company exists.
    async fn company_exists(&self, id: Uuid) -> StorageResult<bool> {
        Ok(self.get_company(id).await?.is_some())
    }

    /// Reads a company, failing with `NotFound` when it does not exist.
    async fn require_company(&self, id: Uuid) -> StorageResult<Company> {
        self.get_company(id)
            .await?
            .ok_or_else(|| company_not_found(id))
    }
}

/// Builds the `NotFound` error for a company.
pub fn company_not_found(id: Uuid) -> StorageError {
    StorageError::Resource(ResourceError::NotFound {
        resource_type: Company::TYPE_NAME.to_string(),
        id: id.to_string(),
    })
}

/// Builds the `NotFound` error for a product.
pub fn product_not_found(id: Uuid) -> StorageError {
    StorageError::Resource(ResourceError::NotFound {
        resource_type: Product::TYPE_NAME.to_string(),
        id: id.to_string(),
    })
}

/// Builds the `AlreadyExists` error for a record.
pub fn already_exists(resource_type: &str, id: Uuid) -> StorageError {
    StorageError::Resource(ResourceError::AlreadyExists {
        resource_type: resource_type.to_string(),
        id: id.to_string(),
    })
}
