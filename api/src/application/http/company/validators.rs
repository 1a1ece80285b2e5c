use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyValidator {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 32, message = "code must be 1 to 32 characters"))]
    pub code: String,

    #[serde(default)]
    pub tax_number: Option<String>,

    #[validate(range(min = 0, message = "employeeCount cannot be negative"))]
    pub employee_count: i64,
}
