use axum::extract::{Path, State};
use fam_core::domain::company::ports::CompanyService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DeleteCompanyResponse {
    pub message: String,
}

#[utoipa::path(
    delete,
    path = "/{company_id}",
    tag = "company",
    summary = "Delete company",
    description = "Soft deletes a company. Companies that still own departments or locations cannot be deleted.",
    params(
        ("company_id" = Uuid, Path, description = "Company ID"),
    ),
    responses(
        (status = 200, body = DeleteCompanyResponse),
        (status = 400, description = "Company still owns departments or locations"),
        (status = 404, description = "Company not found")
    ),
)]
pub async fn delete_company(
    Path(company_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<DeleteCompanyResponse>, ApiError> {
    state
        .service
        .delete_company(company_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(DeleteCompanyResponse {
        message: "Company deleted successfully".to_string(),
    }))
}
