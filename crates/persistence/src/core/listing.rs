//! The listing pipeline.
//!
//! A listing request runs in a fixed order: the order-by list is checked
//! against the mapping registry, the fields list against the view type, the
//! sort expression is compiled, and only then does the backend run its
//! filters. The backend's result is sorted and paged in memory.

use tracing::debug;
use uuid::Uuid;

use crate::error::{ConfigurationError, StorageResult};
use crate::mapping::{MappingTable, PropertyMappingRegistry, RecordComparator, SortExpression};
use crate::types::{Company, FieldAccessors, PagedList, Product, ResourceQuery, Shaped};

use super::source::Collection;
use super::storage::{ListingStorage, company_not_found};

/// Everything needed to validate, sort and project one `(view, storage)` pair.
///
/// Built once at startup and shared read-only.
pub struct ListingSchema<V, T> {
    mappings: MappingTable,
    view: FieldAccessors<V>,
    records: FieldAccessors<T>,
}

impl<V: Shaped, T: Shaped> ListingSchema<V, T> {
    /// Looks up the mapping table for `V -> T` and checks it against the
    /// accessors of `T`.
    pub fn from_registry(registry: &PropertyMappingRegistry) -> Result<Self, ConfigurationError> {
        let mappings = registry.mapping(V::TYPE_NAME, T::TYPE_NAME)?.clone();
        let records = T::accessors();
        mappings.verify_against(&records)?;

        Ok(Self {
            mappings,
            view: V::accessors(),
            records,
        })
    }
}

impl<V, T> ListingSchema<V, T> {
    /// Returns the mapping table.
    pub fn mappings(&self) -> &MappingTable {
        &self.mappings
    }

    /// Returns the accessors of the view type.
    pub fn view(&self) -> &FieldAccessors<V> {
        &self.view
    }

    /// Returns the accessors of the storage type.
    pub fn records(&self) -> &FieldAccessors<T> {
        &self.records
    }

    /// Validates the order-by and fields lists and compiles the comparator.
    ///
    /// Fails with `InvalidSortField` or `UnknownProjectionField` before any
    /// record is read.
    pub fn prepare(&self, order_by: &str, fields: &str) -> StorageResult<RecordComparator<T>> {
        let clause = self.mappings.check_field_list(order_by)?;
        self.view.validate_fields(fields)?;
        SortExpression::from_clause(&clause, &self.mappings)?.compile(&self.records)
    }
}

impl<V, T> Clone for ListingSchema<V, T> {
    fn clone(&self) -> Self {
        Self {
            mappings: self.mappings.clone(),
            view: self.view.clone(),
            records: self.records.clone(),
        }
    }
}

impl<V, T> std::fmt::Debug for ListingSchema<V, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingSchema")
            .field("mappings", &self.mappings)
            .field("view", &self.view)
            .field("records", &self.records)
            .finish()
    }
}

/// Lists one page of companies.
pub async fn list_companies<S, V>(
    storage: &S,
    schema: &ListingSchema<V, Company>,
    query: &ResourceQuery,
) -> StorageResult<PagedList<Company>>
where
    S: ListingStorage + ?Sized,
{
    let comparator = schema.prepare(&query.order_by, query.fields())?;

    let companies = storage.filter_companies(&query.filter).await?;
    let source = Collection::new(companies).order_by(&comparator);
    let page = PagedList::create(&source, query.page_number, query.page_size);

    debug!(
        backend = storage.backend_name(),
        total = page.metadata.total_count,
        page = page.metadata.current_page,
        returned = page.len(),
        "Listed companies"
    );

    Ok(page)
}

/// Lists every product of a company in the requested order.
pub async fn list_products<S, V>(
    storage: &S,
    schema: &ListingSchema<V, Product>,
    company_id: Uuid,
    order_by: &str,
) -> StorageResult<Vec<Product>>
where
    S: ListingStorage + ?Sized,
{
    let comparator = schema.prepare(order_by, "")?;

    if !storage.company_exists(company_id).await? {
        return Err(company_not_found(company_id));
    }

    let products = storage.get_products_for_company(company_id).await?;
    Ok(Collection::new(products).order_by(&comparator).into_inner())
}
