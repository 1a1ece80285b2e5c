use axum::extract::State;
use fam_core::domain::{
    company::{ports::CompanyService, value_objects::CompanyDto},
    query::pagination::PageResult,
};

use crate::application::http::{
    query_extractor::QueryParamsExtractor,
    query_params::ListQueryParams,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "",
    tag = "company",
    summary = "List companies",
    description = "Filters, sorts and pages companies. Available includes: `departments`, `locations`.",
    params(ListQueryParams),
    responses(
        (status = 200, body = PageResult<CompanyDto>),
        (status = 400, description = "Invalid filter, sort or include")
    ),
)]
pub async fn get_companies(
    State(state): State<AppState>,
    QueryParamsExtractor(params): QueryParamsExtractor,
) -> Result<Response<PageResult<CompanyDto>>, ApiError> {
    let page = state
        .service
        .get_companies(params.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(page))
}
