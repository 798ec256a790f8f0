//! In-memory backend.

use std::fmt::Debug;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::core::{ListingStorage, already_exists, company_not_found, product_not_found};
use crate::error::StorageResult;
use crate::types::{Company, CompanyFilter, Product, Shaped};

#[derive(Debug, Default)]
struct Store {
    companies: Vec<Company>,
    products: Vec<Product>,
}

/// Backend holding all records in memory behind a read-write lock.
///
/// Records are kept in insertion order.
#[derive(Default)]
pub struct InMemoryBackend {
    store: RwLock<Store>,
}

impl Debug for InMemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let store = self.store.read();
        f.debug_struct("InMemoryBackend")
            .field("companies", &store.companies.len())
            .field("products", &store.products.len())
            .finish()
    }
}

impl InMemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-loaded with companies and their products.
    pub fn with_companies(companies: Vec<Company>) -> Self {
        let backend = Self::new();
        {
            let mut store = backend.store.write();
            for company in companies {
                insert_company(&mut store, company);
            }
        }
        backend
    }

    /// Returns the number of stored companies.
    pub fn company_count(&self) -> usize {
        self.store.read().companies.len()
    }
}

fn insert_company(store: &mut Store, mut company: Company) -> Company {
    let products = std::mem::take(&mut company.products);
    for mut product in products {
        product.company_id = company.id;
        store.products.push(product);
    }
    store.companies.push(company.clone());
    company
}

#[async_trait]
impl ListingStorage for InMemoryBackend {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn filter_companies(&self, filter: &CompanyFilter) -> StorageResult<Vec<Company>> {
        let filter = filter.normalized();
        let store = self.store.read();
        Ok(store
            .companies
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn get_company(&self, id: Uuid) -> StorageResult<Option<Company>> {
        let store = self.store.read();
        Ok(store.companies.iter().find(|c| c.id == id).cloned())
    }

    async fn get_companies(&self, ids: &[Uuid]) -> StorageResult<Vec<Company>> {
        let store = self.store.read();
        Ok(store
            .companies
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn add_company(&self, company: Company) -> StorageResult<Company> {
        let mut store = self.store.write();
        if store.companies.iter().any(|c| c.id == company.id) {
            return Err(already_exists(Company::TYPE_NAME, company.id));
        }
        if let Some(p) = company
            .products
            .iter()
            .find(|p| store.products.iter().any(|existing| existing.id == p.id))
        {
            return Err(already_exists(Product::TYPE_NAME, p.id));
        }
        Ok(insert_company(&mut store, company))
    }

    async fn update_company(&self, company: &Company) -> StorageResult<Company> {
        let mut store = self.store.write();
        let stored = store
            .companies
            .iter_mut()
            .find(|c| c.id == company.id)
            .ok_or_else(|| company_not_found(company.id))?;

        stored.name = company.name.clone();
        stored.location = company.location.clone();
        stored.start_date = company.start_date;
        stored.date_of_demise = company.date_of_demise;
        Ok(stored.clone())
    }

    async fn delete_company(&self, id: Uuid) -> StorageResult<()> {
        let mut store = self.store.write();
        let before = store.companies.len();
        store.companies.retain(|c| c.id != id);
        if store.companies.len() == before {
            return Err(company_not_found(id));
        }
        store.products.retain(|p| p.company_id != id);
        Ok(())
    }

    async fn delete_companies(&self) -> StorageResult<usize> {
        let mut store = self.store.write();
        let removed = store.companies.len();
        store.companies.clear();
        store.products.clear();
        Ok(removed)
    }

    async fn get_products_for_company(&self, company_id: Uuid) -> StorageResult<Vec<Product>> {
        let store = self.store.read();
        Ok(store
            .products
            .iter()
            .filter(|p| p.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn get_product(&self, company_id: Uuid, id: Uuid) -> StorageResult<Option<Product>> {
        let store = self.store.read();
        Ok(store
            .products
            .iter()
            .find(|p| p.id == id && p.company_id == company_id)
            .cloned())
    }

    async fn add_product(&self, product: Product) -> StorageResult<Product> {
        let mut store = self.store.write();
        if !store.companies.iter().any(|c| c.id == product.company_id) {
            return Err(company_not_found(product.company_id));
        }
        if store.products.iter().any(|p| p.id == product.id) {
            return Err(already_exists(Product::TYPE_NAME, product.id));
        }
        store.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, product: &Product) -> StorageResult<Product> {
        let mut store = self.store.write();
        let stored = store
            .products
            .iter_mut()
            .find(|p| p.id == product.id && p.company_id == product.company_id)
            .ok_or_else(|| product_not_found(product.id))?;

        stored.name = product.name.clone();
        Ok(stored.clone())
    }

    async fn delete_product(&self, company_id: Uuid, id: Uuid) -> StorageResult<()> {
        let mut store = self.store.write();
        let before = store.products.len();
        store
            .products
            .retain(|p| !(p.id == id && p.company_id == company_id));
        if store.products.len() == before {
            return Err(product_not_found(id));
        }
        Ok(())
    }
}
