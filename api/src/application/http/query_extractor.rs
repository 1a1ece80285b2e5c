use axum::{extract::FromRequestParts, http::request::Parts};

use super::{query_params::ListQueryParams, server::api_entities::api_error::ApiError};

/// Extracts [`ListQueryParams`], reporting malformed query strings as `400`.
///
/// ```rust,ignore
/// async fn handler(
///     QueryParamsExtractor(params): QueryParamsExtractor,
/// ) -> Result<Response<PageResult<CompanyDto>>, ApiError> {
///     // params.filter, params.sort, params.page ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct QueryParamsExtractor(pub ListQueryParams);

impl<S> FromRequestParts<S> for QueryParamsExtractor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query_string = parts.uri.query().unwrap_or("");
        let params = serde_urlencoded::from_str::<ListQueryParams>(query_string)
            .map_err(|e| ApiError::BadRequest(format!("invalid query string: {}", e)))?;

        Ok(QueryParamsExtractor(params))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn extract(uri: &str) -> Result<ListQueryParams, ApiError> {
        let request = Request::builder().uri(uri).body(()).expect("valid request");
        let (mut parts, _) = request.into_parts();
        QueryParamsExtractor::from_request_parts(&mut parts, &())
            .await
            .map(|QueryParamsExtractor(params)| params)
    }

    #[tokio::test]
    async fn test_extracts_encoded_filter_and_page_size_alias() {
        let params = extract("/companies?filter=name%20%3D%3D%20%27Acme%27&page=2&page_size=5")
            .await
            .expect("valid query");

        assert_eq!(params.filter.as_deref(), Some("name == 'Acme'"));
        assert_eq!(params.page, Some(2));
        assert_eq!(params.page_size, Some(5));
    }

    #[tokio::test]
    async fn test_camel_case_page_size_is_accepted() {
        let params = extract("/companies?pageSize=7&sort=-createdAt")
            .await
            .expect("valid query");
        assert_eq!(params.page_size, Some(7));
        assert_eq!(params.sort.as_deref(), Some("-createdAt"));
    }

    #[tokio::test]
    async fn test_non_numeric_page_is_rejected() {
        assert!(matches!(
            extract("/companies?page=two").await,
            Err(ApiError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_query_string_yields_defaults() {
        assert_eq!(
            extract("/companies").await.expect("valid query"),
            ListQueryParams::default()
        );
    }
}
