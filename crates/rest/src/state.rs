//! Application state for the listing REST API.
//!
//! This module defines the shared application state that is available to all
//! request handlers: the storage backend, the configuration, and the listing
//! schemas built from the property mapping registry.

use std::sync::Arc;

use hsl_persistence::core::{ListingSchema, ListingStorage};
use hsl_persistence::error::ConfigurationError;
use hsl_persistence::mapping::{PropertyMappingRegistry, listing_registry};
use hsl_persistence::types::{Company, Product};

use crate::config::ServerConfig;
use crate::models::{CompanyDto, ProductDto};

/// Shared application state for the REST API.
///
/// The schemas are resolved from the registry once, when the state is built.
/// A missing mapping therefore fails at startup rather than on a request.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (must implement [`ListingStorage`])
///
/// # Example
///
/// ```rust,ignore
/// use hsl_rest::{AppState, ServerConfig};
/// use hsl_persistence::backends::memory::InMemoryBackend;
/// use std::sync::Arc;
///
/// let state = AppState::try_new(Arc::new(InMemoryBackend::new()), ServerConfig::default())?;
/// ```
pub struct AppState<S> {
    /// The storage backend.
    storage: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,

    /// Company view to stored company.
    companies: Arc<ListingSchema<CompanyDto, Company>>,

    /// Product view to stored product.
    products: Arc<ListingSchema<ProductDto, Product>>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
            companies: Arc::clone(&self.companies),
            products: Arc::clone(&self.products),
        }
    }
}

impl<S: ListingStorage> AppState<S> {
    /// Creates a new AppState using the default listing registry.
    ///
    /// # Arguments
    ///
    /// * `storage` - The storage backend (wrapped in Arc)
    /// * `config` - Server configuration
    pub fn try_new(storage: Arc<S>, config: ServerConfig) -> Result<Self, ConfigurationError> {
        Self::with_registry(storage, config, &listing_registry()?)
    }

    /// Creates a new AppState resolving schemas from the given registry.
    pub fn with_registry(
        storage: Arc<S>,
        config: ServerConfig,
        registry: &PropertyMappingRegistry,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            storage,
            config: Arc::new(config),
            companies: Arc::new(ListingSchema::from_registry(registry)?),
            products: Arc::new(ListingSchema::from_registry(registry)?),
        })
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the company listing schema.
    pub fn company_schema(&self) -> &ListingSchema<CompanyDto, Company> {
        &self.companies
    }

    /// Returns the product listing schema.
    pub fn product_schema(&self) -> &ListingSchema<ProductDto, Product> {
        &self.products
    }

    /// Returns the base URL for the server.
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Returns whether PUT may create missing products.
    pub fn upsert_enabled(&self) -> bool {
        self.config.enable_upsert
    }
}
