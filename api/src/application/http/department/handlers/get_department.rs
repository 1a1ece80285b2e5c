use axum::extract::{Path, Query, State};
use fam_core::domain::department::{ports::DepartmentService, value_objects::DepartmentDto};
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
    path = "/{department_id}",
    tag = "department",
    summary = "Get department",
    params(
        ("department_id" = Uuid, Path, description = "Department ID"),
        IncludeQueryParams
    ),
    responses(
        (status = 200, body = DepartmentDto),
        (status = 404, description = "Department not found")
    ),
)]
pub async fn get_department(
    Path(department_id): Path<Uuid>,
    Query(query): Query<IncludeQueryParams>,
    State(state): State<AppState>,
) -> Result<Response<DepartmentDto>, ApiError> {
    let department = state
        .service
        .get_department(department_id, query.include)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(department))
}
