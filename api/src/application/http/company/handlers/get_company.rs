use axum::extract::{Path, Query, State};
use fam_core::domain::company::{ports::CompanyService, value_objects::CompanyDto};
use uuid::Uuid;

use crate::application::http::{
    query_params::IncludeQueryParams,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/{company_id}",
    tag = "company",
    summary = "Get company",
    params(
        ("company_id" = Uuid, Path, description = "Company ID"),
        IncludeQueryParams
    ),
    responses(
        (status = 200, body = CompanyDto),
        (status = 404, description = "Company not found")
    ),
)]
pub async fn get_company(
    Path(company_id): Path<Uuid>,
    Query(query): Query<IncludeQueryParams>,
    State(state): State<AppState>,
) -> Result<Response<CompanyDto>, ApiError> {
    let company = state
        .service
        .get_company(company_id, query.include)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(company))
}
