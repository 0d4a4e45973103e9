//! Pagination types for list results.
//!
//! Lists are offset-paginated: a 1-based page number and a page size.

use serde::{Deserialize, Serialize};

/// Default number of documents per page.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Default upper bound on the page size.
pub const MAX_PAGE_SIZE: u64 = 100;

/// A request for one page of an ordered collection.
///
/// # Examples
///
/// ```
/// use roster_persistence::types::PageRequest;
///
/// let page = PageRequest::new(3, 10);
/// assert_eq!(page.offset(), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    /// Creates a page request.
    ///
    /// A page number of 0 is treated as 1 and a limit of 0 as 1.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Builds a page request from raw query values.
    ///
    /// Absent, non-numeric, or non-positive inputs fall back to page 1 and
    /// `default_limit`; a limit above `max_limit` is clamped.
    pub fn from_query(
        page: Option<&str>,
        limit: Option<&str>,
        default_limit: u64,
        max_limit: u64,
    ) -> Self {
        let page = parse_positive(page).unwrap_or(1);
        let limit = parse_positive(limit)
            .unwrap_or(default_limit)
            .min(max_limit.max(1));
        Self::new(page, limit)
    }

    /// Returns the 1-based page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Returns the page size.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Returns the number of documents to skip: `(page * limit) - limit`.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.limit) - self.limit
    }

    /// Describes this page against a total document count.
    pub fn info(&self, count: u64) -> PageInfo {
        PageInfo {
            page: self.page,
            pages: count.div_ceil(self.limit),
            count,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

fn parse_positive(value: Option<&str>) -> Option<u64> {
    value
        .map(str::trim)
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
}

/// Pagination metadata returned with a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// The 1-based page number.
    pub page: u64,
    /// Total number of pages.
    pub pages: u64,
    /// Total number of documents.
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(2, 10).offset(), 10);
        assert_eq!(PageRequest::new(4, 25).offset(), 75);
    }

    #[test]
    fn test_zero_inputs_are_raised() {
        let page = PageRequest::new(0, 0);
        assert_eq!(page.page(), 1);
        assert_eq!(page.limit(), 1);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_from_query_defaults() {
        let page = PageRequest::from_query(None, None, 10, 100);
        assert_eq!(page, PageRequest::new(1, 10));
    }

    #[test]
    fn test_from_query_non_numeric() {
        let page = PageRequest::from_query(Some("abc"), Some("lots"), 10, 100);
        assert_eq!(page, PageRequest::new(1, 10));
    }

    #[test]
    fn test_from_query_negative_and_zero() {
        let page = PageRequest::from_query(Some("-2"), Some("0"), 10, 100);
        assert_eq!(page, PageRequest::new(1, 10));
    }

    #[test]
    fn test_from_query_clamps_limit() {
        let page = PageRequest::from_query(Some("2"), Some("5000"), 10, 100);
        assert_eq!(page.page(), 2);
        assert_eq!(page.limit(), 100);
    }

    #[test]
    fn test_info() {
        let info = PageRequest::new(1, 10).info(0);
        assert_eq!(info, PageInfo { page: 1, pages: 0, count: 0 });

        let info = PageRequest::new(2, 10).info(25);
        assert_eq!(info.pages, 3);

        let info = PageRequest::new(1, 5).info(10);
        assert_eq!(info.pages, 2);
    }
}
