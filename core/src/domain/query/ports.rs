use crate::domain::{
    common::entities::app_errors::CoreError,
    query::value_objects::{CompiledQuery, FetchedPage},
};

/// A store that can evaluate compiled queries over `T`.
///
/// Dropping the returned future abandons the fetch.
pub trait QuerySource<T>: Send + Sync {
    fn fetch_page(
        &self,
        query: CompiledQuery<T>,
    ) -> impl Future<Output = Result<FetchedPage<T>, CoreError>> + Send;
}
