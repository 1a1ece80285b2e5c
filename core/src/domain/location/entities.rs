use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LocationStatus {
    Draft,
    Active,
    Archived,
}

impl fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            LocationStatus::Draft => "Draft",
            LocationStatus::Active => "Active",
            LocationStatus::Archived => "Archived",
        };
        write!(f, "{status}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub id: Uuid,
    pub company_id: Uuid,
    pub department_id: Option<Uuid>,
    pub name: String,
    pub city: String,
    pub address: String,
    pub capacity: i64,
    pub status: LocationStatus,
    pub opened_on: Option<NaiveDate>,
    #[serde(default)]
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

pub struct NewLocation {
    pub company_id: Uuid,
    pub department_id: Option<Uuid>,
    pub name: String,
    pub city: String,
    pub address: String,
    pub capacity: i64,
    pub status: LocationStatus,
    pub opened_on: Option<NaiveDate>,
}

impl Location {
    pub fn new(location: NewLocation) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            company_id: location.company_id,
            department_id: location.department_id,
            name: location.name,
            city: location.city,
            address: location.address,
            capacity: location.capacity,
            status: location.status,
            opened_on: location.opened_on,
            is_deleted: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn mark_deleted(&mut self) {
        let now = Utc::now();
        self.is_deleted = true;
        self.deleted_at = Some(now);
        self.updated_at = now;
    }
}
