//! Listing query parameters.

use serde::{Deserialize, Serialize};

use super::Company;

/// Default largest page a client may request.
pub const DEFAULT_MAX_PAGE_SIZE: usize = 10;

/// Default order-by expression.
pub const DEFAULT_ORDER_BY: &str = "Name";

/// Filters applied by the storage backend before sorting and paging.
///
/// `name` and `location` match whole values; `search_query` matches any
/// part of the name. All comparisons ignore case and surrounding whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFilter {
    /// Exact company name.
    pub name: Option<String>,
    /// Exact location.
    pub location: Option<String>,
    /// Substring of the company name.
    pub search_query: Option<String>,
}

impl CompanyFilter {
    /// Returns a copy with values trimmed and blank values dropped.
    pub fn normalized(&self) -> Self {
        fn clean(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        Self {
            name: clean(&self.name),
            location: clean(&self.location),
            search_query: clean(&self.search_query),
        }
    }

    /// Returns true if no filter is set.
    pub fn is_empty(&self) -> bool {
        let normalized = self.normalized();
        normalized.name.is_none()
            && normalized.location.is_none()
            && normalized.search_query.is_none()
    }

    /// Evaluates the filter against a company.
    pub fn matches(&self, company: &Company) -> bool {
        let filter = self.normalized();

        if let Some(name) = &filter.name {
            if company.name.trim().to_lowercase() != name.to_lowercase() {
                return false;
            }
        }

        if let Some(location) = &filter.location {
            match &company.location {
                Some(l) if l.trim().to_lowercase() == location.to_lowercase() => {}
                _ => return false,
            }
        }

        if let Some(search) = &filter.search_query {
            if !company.name.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }

        true
    }
}

/// Per-request listing parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceQuery {
    /// 1-based page number.
    pub page_number: usize,
    /// Records per page.
    pub page_size: usize,
    /// Comma-separated order clauses.
    pub order_by: String,
    /// Comma-separated projection fields.
    pub fields: Option<String>,
    /// Backend filters.
    #[serde(flatten)]
    pub filter: CompanyFilter,
}

impl Default for ResourceQuery {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_MAX_PAGE_SIZE,
            order_by: DEFAULT_ORDER_BY.to_string(),
            fields: None,
            filter: CompanyFilter::default(),
        }
    }
}

impl ResourceQuery {
    /// Creates a query for the first page with default ordering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page, clamping the number to at least 1 and the size to
    /// `1..=max_page_size`.
    pub fn with_page(mut self, page_number: usize, page_size: usize, max_page_size: usize) -> Self {
        self.page_number = page_number.max(1);
        self.page_size = clamp_page_size(page_size, max_page_size);
        self
    }

    /// Sets the order-by expression.
    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = order_by.into();
        self
    }

    /// Sets the projection fields.
    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// Sets the backend filters.
    pub fn with_filter(mut self, filter: CompanyFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Returns the projection fields, or an empty string when none were given.
    pub fn fields(&self) -> &str {
        self.fields.as_deref().unwrap_or("")
    }
}

/// Clamps a requested page size to `1..=max_page_size`.
pub fn clamp_page_size(requested: usize, max_page_size: usize) -> usize {
    requested.clamp(1, max_page_size.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_page_size_clamped_to_max() {
        let query = ResourceQuery::new().with_page(1, 50, DEFAULT_MAX_PAGE_SIZE);
        assert_eq!(query.page_size, 10);
    }

    #[test]
    fn test_page_number_floor() {
        let query = ResourceQuery::new().with_page(0, 0, DEFAULT_MAX_PAGE_SIZE);
        assert_eq!(query.page_number, 1);
        assert_eq!(query.page_size, 1);
    }

    #[test]
    fn test_filter_matches_name_ignoring_case_and_space() {
        let company = Company::new("Acme Health", Utc::now());
        let filter = CompanyFilter {
            name: Some("  acme health ".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&company));
    }

    #[test]
    fn test_filter_location_requires_value() {
        let company = Company::new("Acme", Utc::now());
        let filter = CompanyFilter {
            location: Some("Leeds".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&company));
        assert!(filter.matches(&company.clone().with_location("leeds")));
    }

    #[test]
    fn test_filter_search_query_substring() {
        let company = Company::new("MediSoft Systems", Utc::now());
        let filter = CompanyFilter {
            search_query: Some("soft".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&company));
    }

    #[test]
    fn test_blank_filter_is_empty() {
        let filter = CompanyFilter {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(filter.is_empty());
    }
}
