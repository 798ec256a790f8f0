//! Offset pagination over an ordered record source.

use serde::{Deserialize, Serialize};

use crate::core::RecordSource;

/// Page position and totals for one listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// Number of records across all pages.
    pub total_count: usize,
    /// Records per page.
    pub page_size: usize,
    /// 1-based number of this page.
    pub current_page: usize,
    /// Number of pages; zero when there are no records.
    pub total_pages: usize,
}

impl PageMetadata {
    /// Computes metadata for a page.
    ///
    /// A zero `page_size` is treated as 1 and a zero `current_page` as 1.
    pub fn new(total_count: usize, page_size: usize, current_page: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            total_count,
            page_size,
            current_page: current_page.max(1),
            total_pages: total_count.div_ceil(page_size),
        }
    }

    /// Returns the nearest existing page before this one.
    ///
    /// From a page past the end this is the last page, not `current_page - 1`.
    pub fn previous_page(&self) -> Option<usize> {
        if self.current_page <= 1 || self.total_pages == 0 {
            return None;
        }
        Some((self.current_page - 1).min(self.total_pages))
    }

    /// Returns the page after this one, if it exists.
    pub fn next_page(&self) -> Option<usize> {
        (self.current_page < self.total_pages).then_some(self.current_page + 1)
    }

    /// Returns true if a page precedes this one.
    pub fn has_previous(&self) -> bool {
        self.previous_page().is_some()
    }

    /// Returns true if a page follows this one.
    pub fn has_next(&self) -> bool {
        self.next_page().is_some()
    }
}

/// One page of records and its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedList<T> {
    /// Records on this page, in source order.
    pub items: Vec<T>,
    /// Page totals.
    pub metadata: PageMetadata,
}

impl<T> PagedList<T> {
    /// Pages an ordered source.
    ///
    /// The source is counted once, then `page_size` records are fetched after
    /// skipping `(page_number - 1) * page_size`. A page past the end yields
    /// no items but still reports the true totals.
    pub fn create<R>(source: &R, page_number: usize, page_size: usize) -> Self
    where
        R: RecordSource<Item = T> + ?Sized,
    {
        let metadata = PageMetadata::new(source.count(), page_size, page_number);
        let skip = (metadata.current_page - 1).saturating_mul(metadata.page_size);
        let items = if skip >= metadata.total_count {
            Vec::new()
        } else {
            source.fetch(skip, metadata.page_size)
        };

        Self { items, metadata }
    }

    /// Returns the number of records on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if this page holds no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maps the records, keeping the metadata.
    pub fn map<U, F>(self, f: F) -> PagedList<U>
    where
        F: FnMut(T) -> U,
    {
        PagedList {
            items: self.items.into_iter().map(f).collect(),
            metadata: self.metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Collection;

    fn numbers(n: usize) -> Collection<usize> {
        Collection::new((1..=n).collect())
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(PageMetadata::new(25, 10, 1).total_pages, 3);
        assert_eq!(PageMetadata::new(20, 10, 1).total_pages, 2);
        assert_eq!(PageMetadata::new(1, 10, 1).total_pages, 1);
    }

    #[test]
    fn test_empty_source_has_no_pages() {
        let page = PagedList::create(&numbers(0), 1, 10);
        assert!(page.is_empty());
        assert_eq!(page.metadata.total_pages, 0);
        assert!(!page.metadata.has_next());
        assert!(!page.metadata.has_previous());
    }

    #[test]
    fn test_middle_page() {
        let page = PagedList::create(&numbers(25), 2, 10);
        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.metadata.total_count, 25);
        assert_eq!(page.metadata.total_pages, 3);
        assert!(page.metadata.has_next());
        assert!(page.metadata.has_previous());
    }

    #[test]
    fn test_last_partial_page() {
        let page = PagedList::create(&numbers(25), 3, 10);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert!(!page.metadata.has_next());
    }

    #[test]
    fn test_page_past_end_is_empty_with_totals() {
        let page = PagedList::create(&numbers(25), 7, 10);
        assert!(page.is_empty());
        assert_eq!(page.metadata.current_page, 7);
        assert_eq!(page.metadata.total_count, 25);
        assert_eq!(page.metadata.previous_page(), Some(3));
        assert!(!page.metadata.has_next());
    }

    #[test]
    fn test_neighbour_pages() {
        let middle = PageMetadata::new(25, 10, 2);
        assert_eq!(middle.previous_page(), Some(1));
        assert_eq!(middle.next_page(), Some(3));

        assert_eq!(PageMetadata::new(25, 10, 1).previous_page(), None);
        assert_eq!(PageMetadata::new(25, 10, 4).previous_page(), Some(3));
        assert_eq!(PageMetadata::new(0, 10, 5).previous_page(), None);
        assert_eq!(PageMetadata::new(0, 10, 5).next_page(), None);
    }

    #[test]
    fn test_metadata_serializes_camel_case() {
        let json = serde_json::to_value(PageMetadata::new(25, 10, 2)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalCount": 25,
                "pageSize": 10,
                "currentPage": 2,
                "totalPages": 3
            })
        );
    }
}
