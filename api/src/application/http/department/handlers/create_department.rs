use axum::extract::State;
use fam_core::domain::department::{
    ports::DepartmentService,
    value_objects::{CreateDepartmentInput, DepartmentDto},
};

use crate::application::http::{
    department::validators::CreateDepartmentValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "",
    tag = "department",
    summary = "Create department",
    description = "The company, and the parent department when given, must exist and belong together.",
    request_body = CreateDepartmentValidator,
    responses(
        (status = 201, body = DepartmentDto),
        (status = 400, description = "Invalid body or unknown references")
    ),
)]
pub async fn create_department(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<CreateDepartmentValidator>,
) -> Result<Response<DepartmentDto>, ApiError> {
    let department = state
        .service
        .create_department(CreateDepartmentInput {
            company_id: payload.company_id,
            parent_id: payload.parent_id,
            name: payload.name,
            code: payload.code,
            budget: payload.budget,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(department))
}
