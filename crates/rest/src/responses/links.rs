//! Hypermedia link assembly.
//!
//! All hrefs are absolute, built from the configured base URL. Collection
//! links carry the full listing query so that following `nextPage` keeps the
//! client's ordering, projection and filters.

use hsl_persistence::types::{Link, PageMetadata, ResourceQuery};
use serde::Serialize;
use url::form_urlencoded;
use uuid::Uuid;

use crate::extractors::IdList;

/// Hypermedia envelope for a collection: the items and the collection's links.
#[derive(Debug, Clone, Serialize)]
pub struct LinkedCollection<T> {
    /// Items, each carrying its own links.
    pub value: Vec<T>,
    /// Links for the collection itself.
    pub links: Vec<Link>,
}

/// Builds links and resource URIs rooted at a base URL.
#[derive(Debug, Clone)]
pub struct LinkAssembler {
    base_url: String,
}

impl LinkAssembler {
    /// Creates an assembler. A trailing slash on `base_url` is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URI of the API root.
    pub fn root_uri(&self) -> String {
        format!("{}/api", self.base_url)
    }

    /// URI of the company collection, without a query.
    pub fn companies_uri(&self) -> String {
        format!("{}/api/companies", self.base_url)
    }

    /// URI of one company.
    pub fn company_uri(&self, id: Uuid) -> String {
        format!("{}/api/companies/{}", self.base_url, id)
    }

    /// URI of a company's products.
    pub fn products_uri(&self, company_id: Uuid) -> String {
        format!("{}/api/companies/{}/products", self.base_url, company_id)
    }

    /// URI of one product.
    pub fn product_uri(&self, company_id: Uuid, id: Uuid) -> String {
        format!("{}/{}", self.products_uri(company_id), id)
    }

    /// URI of a set of companies created together.
    pub fn company_collection_uri(&self, ids: &[Uuid]) -> String {
        format!(
            "{}/api/companycollections/{}",
            self.base_url,
            IdList::format(ids)
        )
    }

    /// URI of a listing page.
    ///
    /// Every parameter of `query` is carried over; only the page number
    /// changes. Blank optional parameters are left out. `orderBy` is always
    /// present, so a blank ordering survives navigation.
    pub fn companies_page_uri(&self, query: &ResourceQuery, page_number: usize) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        append_optional(&mut serializer, "fields", query.fields.as_deref());
        serializer.append_pair("orderBy", &query.order_by);
        append_optional(&mut serializer, "searchQuery", query.filter.search_query.as_deref());
        append_optional(&mut serializer, "location", query.filter.location.as_deref());
        append_optional(&mut serializer, "name", query.filter.name.as_deref());
        serializer.append_pair("pageNumber", &page_number.to_string());
        serializer.append_pair("pageSize", &query.page_size.to_string());

        format!("{}?{}", self.companies_uri(), serializer.finish())
    }

    /// Links for a listing page.
    ///
    /// `nextPage` and `previousPage` appear only when that page exists.
    pub fn links_for_companies(&self, query: &ResourceQuery, metadata: &PageMetadata) -> Vec<Link> {
        let mut links = vec![Link::new(
            self.companies_page_uri(query, query.page_number),
            "self",
            "GET",
        )];

        if let Some(next) = metadata.next_page() {
            links.push(Link::new(
                self.companies_page_uri(query, next),
                "nextPage",
                "GET",
            ));
        }

        if let Some(previous) = metadata.previous_page() {
            links.push(Link::new(
                self.companies_page_uri(query, previous),
                "previousPage",
                "GET",
            ));
        }

        links
    }

    /// Links for one company. `self` carries `fields` when it is not blank.
    pub fn links_for_company(&self, id: Uuid, fields: &str) -> Vec<Link> {
        let company_uri = self.company_uri(id);
        let self_href = if fields.trim().is_empty() {
            company_uri.clone()
        } else {
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair("fields", fields.trim())
                .finish();
            format!("{}?{}", company_uri, query)
        };

        vec![
            Link::new(self_href, "self", "GET"),
            Link::new(company_uri, "delete_company", "DELETE"),
            Link::new(self.products_uri(id), "create_product_for_company", "POST"),
            Link::new(self.products_uri(id), "products", "GET"),
        ]
    }

    /// Links for one product.
    pub fn links_for_product(&self, company_id: Uuid, id: Uuid) -> Vec<Link> {
        let uri = self.product_uri(company_id, id);
        vec![
            Link::new(uri.clone(), "self", "GET"),
            Link::new(uri.clone(), "delete_product", "DELETE"),
            Link::new(uri.clone(), "update_product", "PUT"),
            Link::new(uri, "partially_update_product", "PATCH"),
        ]
    }

    /// Links for a company's product list.
    pub fn links_for_products(&self, company_id: Uuid) -> Vec<Link> {
        vec![Link::new(self.products_uri(company_id), "self", "GET")]
    }

    /// Links for the API root.
    pub fn links_for_root(&self) -> Vec<Link> {
        vec![
            Link::new(self.root_uri(), "self", "GET"),
            Link::new(self.companies_uri(), "companies", "GET"),
            Link::new(self.companies_uri(), "create_company", "POST"),
        ]
    }
}

fn append_optional(
    serializer: &mut form_urlencoded::Serializer<'_, String>,
    key: &str,
    value: Option<&str>,
) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        serializer.append_pair(key, value);
    }
}
