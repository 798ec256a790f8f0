//! Mapping tables for the company and product listings.

use crate::error::ConfigurationError;
use crate::types::{Company, Product, Shaped};

use super::registry::{MappingTable, MappingTarget, PropertyMappingRegistry};

/// Name of the company view type.
pub const COMPANY_VIEW: &str = "CompanyDto";

/// Name of the product view type.
pub const PRODUCT_VIEW: &str = "ProductDto";

/// Sortable fields of the company view.
pub fn company_mappings() -> MappingTable {
    MappingTable::new(COMPANY_VIEW, Company::TYPE_NAME)
        .map("Id", [MappingTarget::new("Id")])
        .map("Name", [MappingTarget::new("Name")])
        .map("Age", [MappingTarget::inverted("StartDate")])
        .map("Location", [MappingTarget::new("Location")])
}

/// Sortable fields of the product view.
pub fn product_mappings() -> MappingTable {
    MappingTable::new(PRODUCT_VIEW, Product::TYPE_NAME)
        .map("Id", [MappingTarget::new("Id")])
        .map("Name", [MappingTarget::new("Name")])
}

/// Builds the registry used by the listing service.
///
/// Every table is checked against the accessor table of its storage type,
/// so a storage path without a getter fails here rather than on a request.
pub fn listing_registry() -> Result<PropertyMappingRegistry, ConfigurationError> {
    let companies = company_mappings();
    companies.verify_against(&Company::accessors())?;

    let products = product_mappings();
    products.verify_against(&Product::accessors())?;

    PropertyMappingRegistry::new()
        .with_table(companies)?
        .with_table(products)
}
