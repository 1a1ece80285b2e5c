use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::query::{
    binder::Predicate, includes::IncludeSet, pagination::Pagination, sort::SortOrder,
};

/// Raw list parameters exactly as a client sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub filter: Option<String>,
    pub sort: Option<String>,
    pub include: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryLimits {
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub max_filter_depth: usize,
    pub max_filter_length: usize,
    /// Reject unknown or unsortable sort fields instead of skipping them.
    pub strict_sort: bool,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
            max_filter_depth: 32,
            max_filter_length: 2048,
            strict_sort: false,
        }
    }
}

/// Everything a persistence provider needs to answer one list request.
pub struct CompiledQuery<T> {
    pub predicate: Predicate<T>,
    /// Empty when the client asked for no usable ordering; the provider then
    /// applies its own default.
    pub order: SortOrder<T>,
    pub includes: IncludeSet,
    pub pagination: Pagination,
}

impl<T: 'static> CompiledQuery<T> {
    pub fn and_filter(mut self, predicate: Predicate<T>) -> Self {
        self.predicate = self.predicate.and(predicate);
        self
    }
}

impl<T> Clone for CompiledQuery<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
            order: self.order.clone(),
            includes: self.includes.clone(),
            pagination: self.pagination,
        }
    }
}

impl<T> std::fmt::Debug for CompiledQuery<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledQuery")
            .field("order", &self.order)
            .field("includes", &self.includes)
            .field("pagination", &self.pagination)
            .finish_non_exhaustive()
    }
}

/// One page of entities and the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}
