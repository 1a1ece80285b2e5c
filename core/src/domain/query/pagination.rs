use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::query::value_objects::QueryLimits;

/// A 1-based page request with its size already clamped to the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    page_size: u32,
}

impl Pagination {
    pub fn new(page: Option<i64>, page_size: Option<i64>, limits: &QueryLimits) -> Self {
        let max_page_size = limits.max_page_size.max(1);
        let page_size = page_size
            .unwrap_or(i64::from(limits.default_page_size))
            .clamp(1, i64::from(max_page_size));
        let page = page.unwrap_or(1).clamp(1, i64::from(u32::MAX));

        Self {
            page: page as u32,
            page_size: page_size as u32,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    pub fn take(&self) -> u64 {
        u64::from(self.page_size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    /// Matching items before pagination.
    pub total_count: u64,
    pub total_pages: u64,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, pagination: Pagination, total_count: u64) -> Self {
        Self {
            items,
            page: pagination.page(),
            page_size: pagination.page_size(),
            total_count,
            total_pages: total_count.div_ceil(u64::from(pagination.page_size())),
        }
    }

    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }
}
