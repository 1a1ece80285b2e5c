use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    company::value_objects::CompanySummary,
    department::value_objects::DepartmentRef,
    location::entities::{Location, LocationStatus},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateLocationInput {
    pub company_id: Uuid,
    pub department_id: Option<Uuid>,
    pub name: String,
    pub city: String,
    pub address: String,
    pub capacity: i64,
    pub status: LocationStatus,
    pub opened_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    pub id: Uuid,
    pub company_id: Uuid,
    pub department_id: Option<Uuid>,
    pub name: String,
    pub city: String,
    pub address: String,
    pub capacity: i64,
    pub status: LocationStatus,
    pub opened_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanySummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<DepartmentRef>,
}

impl From<&Location> for LocationDto {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id,
            company_id: location.company_id,
            department_id: location.department_id,
            name: location.name.clone(),
            city: location.city.clone(),
            address: location.address.clone(),
            capacity: location.capacity,
            status: location.status,
            opened_on: location.opened_on,
            created_at: location.created_at,
            company: None,
            department: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationSummary {
    pub id: Uuid,
    pub name: String,
    pub city: String,
}

impl From<&Location> for LocationSummary {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id,
            name: location.name.clone(),
            city: location.city.clone(),
        }
    }
}
