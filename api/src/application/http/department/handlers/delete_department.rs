use axum::extract::{Path, State};
use fam_core::domain::department::ports::DepartmentService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DeleteDepartmentResponse {
    pub message: String,
}

#[utoipa::path(
    delete,
    path = "/{department_id}",
    tag = "department",
    summary = "Delete department",
    params(
        ("department_id" = Uuid, Path, description = "Department ID"),
    ),
    responses(
        (status = 200, body = DeleteDepartmentResponse),
        (status = 404, description = "Department not found")
    ),
)]
pub async fn delete_department(
    Path(department_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<DeleteDepartmentResponse>, ApiError> {
    state
        .service
        .delete_department(department_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DeleteDepartmentResponse {
        message: "Department deleted successfully".to_string(),
    }))
}
