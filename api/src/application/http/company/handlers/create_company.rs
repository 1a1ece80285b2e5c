use axum::extract::State;
use fam_core::domain::company::{
    ports::CompanyService,
    value_objects::{CompanyDto, CreateCompanyInput},
};

use crate::application::http::{
    company::validators::CreateCompanyValidator,
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
    tag = "company",
    summary = "Create company",
    request_body = CreateCompanyValidator,
    responses(
        (status = 201, body = CompanyDto),
        (status = 400, description = "Invalid body")
    ),
)]
pub async fn create_company(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<CreateCompanyValidator>,
) -> Result<Response<CompanyDto>, ApiError> {
    let company = state
        .service
        .create_company(CreateCompanyInput {
            name: payload.name,
            code: payload.code,
            tax_number: payload.tax_number,
            employee_count: payload.employee_count,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(company))
}
