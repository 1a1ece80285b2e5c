use fam_core::domain::query::value_objects::QueryRequest;
use serde::Deserialize;
use utoipa::IntoParams;

/// Query string accepted by every list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQueryParams {
    /// Filter expression, e.g. `employeeCount > 10 AND @contains(name, 'corp')`.
    pub filter: Option<String>,
    /// Comma-separated sort keys; a leading `-` sorts descending.
    pub sort: Option<String>,
    /// Comma-separated related entities to load.
    pub include: Option<String>,
    /// 1-based page number.
    pub page: Option<i64>,
    #[serde(alias = "page_size")]
    pub page_size: Option<i64>,
}

impl From<ListQueryParams> for QueryRequest {
    fn from(params: ListQueryParams) -> Self {
        Self {
            filter: params.filter,
            sort: params.sort,
            include: params.include,
            page: params.page,
            page_size: params.page_size,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IncludeQueryParams {
    /// Comma-separated related entities to load.
    pub include: Option<String>,
}
