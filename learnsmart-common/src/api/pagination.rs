//! Pagination utilities
//!
//! Pages are zero-indexed, matching the `{content, page, size,
//! totalElements, totalPages}` envelope consumers expect.

use serde::{Deserialize, Serialize};

/// Default page size when the caller does not specify one
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound on requested page size
pub const MAX_PAGE_SIZE: i64 = 1000;

/// `?page=&size=` query parameters
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageQuery {
    /// Build from optional query fields of a larger filter struct
    pub fn from_parts(page: Option<i64>, size: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(0),
            size: size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    /// Page number clamped to >= 0
    pub fn page(&self) -> i64 {
        self.page.max(0)
    }

    /// Page size clamped to [1, MAX_PAGE_SIZE]
    pub fn size(&self) -> i64 {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Offset for SQL LIMIT/OFFSET query
    pub fn offset(&self) -> i64 {
        self.page() * self.size()
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, query: &PageQuery, total_elements: i64) -> Self {
        let size = query.size();
        Self {
            content,
            page: query.page(),
            size,
            total_elements,
            total_pages: (total_elements + size - 1) / size,
        }
    }
}
