use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentValidator {
    pub company_id: Uuid,

    #[serde(default)]
    pub parent_id: Option<Uuid>,

    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 32, message = "code must be 1 to 32 characters"))]
    pub code: String,

    #[validate(range(min = 0.0, message = "budget cannot be negative"))]
    pub budget: f64,
}
