use chrono::NaiveDate;
use fam_core::domain::location::entities::LocationStatus;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationValidator {
    pub company_id: Uuid,

    #[serde(default)]
    pub department_id: Option<Uuid>,

    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,

    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,

    #[validate(range(min = 0, message = "capacity cannot be negative"))]
    pub capacity: i64,

    pub status: LocationStatus,

    #[serde(default)]
    pub opened_on: Option<NaiveDate>,
}
