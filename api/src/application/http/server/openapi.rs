use utoipa::OpenApi;

use crate::application::http::{
    company::router::CompanyApiDoc, department::router::DepartmentApiDoc,
    health::HealthApiDoc, location::router::LocationApiDoc,
    server::api_entities::api_error::ApiErrorResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FAM API",
        description = "Companies, departments and locations with filter, sort, include and paging."
    ),
    components(schemas(ApiErrorResponse)),
    nest(
        (path = "/health", api = HealthApiDoc),
        (path = "/companies", api = CompanyApiDoc),
        (path = "/departments", api = DepartmentApiDoc),
        (path = "/locations", api = LocationApiDoc),
    )
)]
pub struct ApiDoc;
