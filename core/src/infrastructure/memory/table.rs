use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{
    common::entities::app_errors::CoreError,
    query::{
        ports::QuerySource,
        sort::SortOrder,
        value_objects::{CompiledQuery, FetchedPage},
    },
};

/// Rows of one entity kept in insertion order.
pub struct InMemoryTable<T> {
    rows: Arc<RwLock<Vec<T>>>,
    default_order: SortOrder<T>,
}

impl<T> Clone for InMemoryTable<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
            default_order: self.default_order.clone(),
        }
    }
}

impl<T> InMemoryTable<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// `default_order` is used for pages whose compiled ordering is empty.
    pub fn new(rows: Vec<T>, default_order: SortOrder<T>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows)),
            default_order,
        }
    }

    pub async fn find<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool + Send,
    {
        self.rows
            .read()
            .await
            .iter()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    pub async fn find_one<F>(&self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool + Send,
    {
        self.rows.read().await.iter().find(|row| predicate(row)).cloned()
    }

    /// Appends `row` unless an existing row satisfies `conflicts`.
    pub async fn insert<F>(&self, row: T, conflicts: F) -> bool
    where
        F: Fn(&T) -> bool + Send,
    {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|existing| conflicts(existing)) {
            return false;
        }
        rows.push(row);
        true
    }

    /// Applies `change` to every matching row and returns how many were touched.
    pub async fn update<F, U>(&self, predicate: F, mut change: U) -> usize
    where
        F: Fn(&T) -> bool + Send,
        U: FnMut(&mut T) + Send,
    {
        let mut rows = self.rows.write().await;
        let mut updated = 0;
        for row in rows.iter_mut().filter(|row| predicate(row)) {
            change(row);
            updated += 1;
        }
        updated
    }
}

impl<T> QuerySource<T> for InMemoryTable<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn fetch_page(&self, query: CompiledQuery<T>) -> Result<FetchedPage<T>, CoreError> {
        let mut matched: Vec<T> = {
            let rows = self.rows.read().await;
            rows.iter()
                .filter(|row| query.predicate.evaluate(row))
                .cloned()
                .collect()
        };
        let total_count = matched.len() as u64;

        if query.order.is_empty() {
            self.default_order.sort(&mut matched);
        } else {
            query.order.sort(&mut matched);
        }

        let skip = usize::try_from(query.pagination.skip()).unwrap_or(usize::MAX);
        let take = usize::try_from(query.pagination.take()).unwrap_or(usize::MAX);
        let items: Vec<T> = matched.into_iter().skip(skip).take(take).collect();

        debug!(
            total_count,
            returned = items.len(),
            page = query.pagination.page(),
            "fetched in-memory page"
        );

        Ok(FetchedPage { items, total_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::{
        field_map::FieldMap,
        services::QueryCompiler,
        sort::SortDirection,
        value_objects::{QueryLimits, QueryRequest},
    };

    #[derive(Debug, Clone, PartialEq)]
    struct Asset {
        tag: i64,
        group: String,
    }

    fn fields() -> FieldMap<Asset> {
        FieldMap::new()
            .add("tag", |a: &Asset| a.tag, true, true)
            .and_then(|m| m.add("group", |a: &Asset| a.group.clone(), true, true))
            .expect("valid field map")
    }

    fn table(count: i64) -> InMemoryTable<Asset> {
        let rows = (1..=count)
            .map(|tag| Asset {
                tag,
                group: if tag % 2 == 0 { "even" } else { "odd" }.to_string(),
            })
            .collect();
        InMemoryTable::new(rows, SortOrder::by("tag", |a: &Asset| a.tag, SortDirection::Desc))
    }

    fn compile(request: QueryRequest) -> CompiledQuery<Asset> {
        QueryCompiler::new(QueryLimits::default())
            .compile(&request, &fields())
            .expect("query compiles")
    }

    fn tags(page: &FetchedPage<Asset>) -> Vec<i64> {
        page.items.iter().map(|a| a.tag).collect()
    }

    #[tokio::test]
    async fn test_pages_are_cut_after_filtering_and_sorting() {
        let table = table(25);

        let second = table
            .fetch_page(compile(QueryRequest {
                sort: Some("tag".to_string()),
                page: Some(2),
                page_size: Some(10),
                ..QueryRequest::default()
            }))
            .await
            .expect("page fetched");
        assert_eq!(second.total_count, 25);
        assert_eq!(tags(&second), (11..=20).collect::<Vec<_>>());

        let third = table
            .fetch_page(compile(QueryRequest {
                sort: Some("tag".to_string()),
                page: Some(3),
                page_size: Some(10),
                ..QueryRequest::default()
            }))
            .await
            .expect("page fetched");
        assert_eq!(tags(&third), (21..=25).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_default_order_applies_without_sort_keys() {
        let page = table(5)
            .fetch_page(compile(QueryRequest {
                filter: Some("group == 'odd'".to_string()),
                ..QueryRequest::default()
            }))
            .await
            .expect("page fetched");

        assert_eq!(page.total_count, 3);
        assert_eq!(tags(&page), vec![5, 3, 1]);
    }

    #[tokio::test]
    async fn test_secondary_key_breaks_ties_stably() {
        let page = table(6)
            .fetch_page(compile(QueryRequest {
                sort: Some("group,-tag".to_string()),
                ..QueryRequest::default()
            }))
            .await
            .expect("page fetched");

        assert_eq!(tags(&page), vec![6, 4, 2, 5, 3, 1]);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty_but_counted() {
        let page = table(4)
            .fetch_page(compile(QueryRequest {
                page: Some(9),
                ..QueryRequest::default()
            }))
            .await
            .expect("page fetched");

        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 4);
    }

    #[tokio::test]
    async fn test_insert_refuses_conflicts_and_update_counts_rows() {
        let table = table(2);
        let duplicate = Asset {
            tag: 1,
            group: "odd".to_string(),
        };
        assert!(!table.insert(duplicate, |a| a.tag == 1).await);

        let fresh = Asset {
            tag: 3,
            group: "odd".to_string(),
        };
        assert!(table.insert(fresh, |a| a.tag == 3).await);
        assert_eq!(table.find(|_| true).await.len(), 3);

        let updated = table
            .update(|a| a.group == "odd", |a| a.group = "legacy".to_string())
            .await;
        assert_eq!(updated, 2);
        assert_eq!(table.find(|a| a.group == "legacy").await.len(), 2);
    }
}
