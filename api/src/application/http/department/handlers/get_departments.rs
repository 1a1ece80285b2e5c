use axum::extract::State;
use fam_core::domain::{
    department::{ports::DepartmentService, value_objects::DepartmentDto},
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
    tag = "department",
    summary = "List departments",
    description = "Filters, sorts and pages departments. Available includes: `company`, `parent`, `parent.company`.",
    params(ListQueryParams),
    responses(
        (status = 200, body = PageResult<DepartmentDto>),
        (status = 400, description = "Invalid filter, sort or include")
    ),
)]
pub async fn get_departments(
    State(state): State<AppState>,
    QueryParamsExtractor(params): QueryParamsExtractor,
) -> Result<Response<PageResult<DepartmentDto>>, ApiError> {
    let page = state
        .service
        .get_departments(params.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(page))
}
