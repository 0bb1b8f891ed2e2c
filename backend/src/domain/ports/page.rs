//! Paging primitives shared by the stall store port and its adapters.

/// Requested page window for listing operations.
///
/// Pages are zero-based. The page size defaults to 20 and is clamped to
/// [`PageRequest::MAX_PER_PAGE`] so a single request cannot drag the whole
/// table through the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Page size applied when the caller does not specify one.
    pub const DEFAULT_PER_PAGE: u32 = 20;
    /// Upper bound on the page size.
    pub const MAX_PER_PAGE: u32 = 100;

    /// Build a page request, clamping `per_page` into `1..=MAX_PER_PAGE`.
    ///
    /// # Examples
    /// ```
    /// use exhibitflow::domain::ports::PageRequest;
    ///
    /// let page = PageRequest::new(2, 500);
    /// assert_eq!(page.page(), 2);
    /// assert_eq!(page.per_page(), PageRequest::MAX_PER_PAGE);
    /// ```
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page,
            per_page: per_page.clamp(1, Self::MAX_PER_PAGE),
        }
    }

    /// Zero-based page index.
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Row offset for SQL-style adapters.
    pub const fn offset(&self) -> i64 {
        self.page as i64 * self.per_page as i64
    }

    /// Row limit for SQL-style adapters.
    pub const fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_PER_PAGE)
    }
}

/// One page of results together with the totals needed to render a paging
/// envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items on this page, in adapter-defined stable order.
    pub items: Vec<T>,
    /// Zero-based page index that was requested.
    pub page: u32,
    /// Page size that was applied.
    pub per_page: u32,
    /// Total number of matching items across all pages.
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// Number of pages needed to cover `total_elements`.
    pub const fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(self.per_page as u64)
    }

    /// Map the items into another representation, keeping the envelope.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_elements: self.total_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, 1)]
    #[case(0, 20, 20)]
    #[case(3, 1000, PageRequest::MAX_PER_PAGE)]
    fn per_page_is_clamped(#[case] page: u32, #[case] requested: u32, #[case] expected: u32) {
        let request = PageRequest::new(page, requested);
        assert_eq!(request.per_page(), expected);
        assert_eq!(request.page(), page);
    }

    #[rstest]
    fn offset_multiplies_page_by_size() {
        let request = PageRequest::new(3, 25);
        assert_eq!(request.offset(), 75);
        assert_eq!(request.limit(), 25);
    }

    #[rstest]
    #[case(0, 20, 0)]
    #[case(1, 20, 1)]
    #[case(20, 20, 1)]
    #[case(21, 20, 2)]
    fn total_pages_rounds_up(#[case] total: u64, #[case] per_page: u32, #[case] expected: u64) {
        let page: Page<u8> = Page {
            items: Vec::new(),
            page: 0,
            per_page,
            total_elements: total,
        };
        assert_eq!(page.total_pages(), expected);
    }

    #[rstest]
    fn map_preserves_the_envelope() {
        let page = Page {
            items: vec![1, 2, 3],
            page: 1,
            per_page: 3,
            total_elements: 7,
        };
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20, 30]);
        assert_eq!(mapped.page, 1);
        assert_eq!(mapped.total_elements, 7);
    }
}
