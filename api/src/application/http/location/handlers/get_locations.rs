use axum::extract::State;
use fam_core::domain::{
    location::{ports::LocationService, value_objects::LocationDto},
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
    tag = "location",
    summary = "List locations",
    description = "Filters, sorts and pages locations. `address` is sortable only. Available includes: `company`, `department`, `department.company`.",
    params(ListQueryParams),
    responses(
        (status = 200, body = PageResult<LocationDto>),
        (status = 400, description = "Invalid filter, sort or include")
    ),
)]
pub async fn get_locations(
    State(state): State<AppState>,
    QueryParamsExtractor(params): QueryParamsExtractor,
) -> Result<Response<PageResult<LocationDto>>, ApiError> {
    let page = state
        .service
        .get_locations(params.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(page))
}
