use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    company::entities::Company, department::value_objects::DepartmentSummary,
    location::value_objects::LocationSummary,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCompanyInput {
    pub name: String,
    pub code: String,
    pub tax_number: Option<String>,
    pub employee_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDto {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub tax_number: Option<String>,
    pub employee_count: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departments: Option<Vec<DepartmentSummary>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<LocationSummary>>,
}

impl From<&Company> for CompanyDto {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id,
            name: company.name.clone(),
            code: company.code.clone(),
            tax_number: company.tax_number.clone(),
            employee_count: company.employee_count,
            is_active: company.is_active,
            created_at: company.created_at,
            updated_at: company.updated_at,
            departments: None,
            locations: None,
        }
    }
}

/// Compact form embedded in other entities' responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub id: Uuid,
    pub name: String,
    pub code: String,
}

impl From<&Company> for CompanySummary {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id,
            name: company.name.clone(),
            code: company.code.clone(),
        }
    }
}
