//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MIN_PER_PAGE: u32 = 1;
pub const MAX_PER_PAGE: u32 = 100;

/// Pagination parameters for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of items per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Create a new pagination, clamping out-of-range values
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(MIN_PER_PAGE, MAX_PER_PAGE),
        }
    }

    /// Build from optional query values
    pub fn from_query(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self::new(
            page.unwrap_or(DEFAULT_PAGE),
            per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> u32 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> u32 {
        self.per_page
    }

    pub fn offset_i64(&self) -> i64 {
        i64::from(self.offset())
    }

    pub fn limit_i64(&self) -> i64 {
        i64::from(self.limit())
    }
}

/// Paginated response wrapper with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, pagination: Pagination, total: u64) -> Self {
        let total_pages = Self::calculate_total_pages(total, pagination.per_page);
        Self {
            items,
            page: pagination.page,
            per_page: pagination.per_page,
            total,
            total_pages,
            has_next: pagination.page < total_pages,
            has_prev: pagination.page > 1,
        }
    }

    pub fn empty(pagination: Pagination) -> Self {
        Self::new(Vec::new(), pagination, 0)
    }

    fn calculate_total_pages(total: u64, per_page: u32) -> u32 {
        if total == 0 || per_page == 0 {
            return 0;
        }
        let pages = total.div_ceil(u64::from(per_page));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Transform the items using a function
    pub fn map<U, F>(self, f: F) -> PaginatedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_clamps() {
        let p = Pagination::new(0, 500);
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, MAX_PER_PAGE);

        let p = Pagination::from_query(None, Some(0));
        assert_eq!(p.per_page, MIN_PER_PAGE);
    }

    #[test]
    fn test_offset() {
        assert_eq!(Pagination::new(1, 20).offset(), 0);
        assert_eq!(Pagination::new(3, 20).offset(), 40);
    }

    #[test]
    fn test_paginated_response_metadata() {
        let page = PaginatedResponse::new(vec![1, 2], Pagination::new(2, 2), 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(page.has_prev);

        let last = PaginatedResponse::new(vec![5], Pagination::new(3, 2), 5);
        assert!(!last.has_next);
    }

    #[test]
    fn test_empty_response() {
        let page: PaginatedResponse<u8> = PaginatedResponse::empty(Pagination::default());
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next);
        assert!(!page.has_prev);
        assert!(page.is_empty());
    }
}
