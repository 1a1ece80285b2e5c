use crate::domain::{
    location::entities::Location,
    query::{errors::QueryError, field_map::FieldMap, includes::IncludeOptions},
};

pub const LOCATION_INCLUDES: [&str; 3] = ["company", "department", "department.company"];

pub fn location_fields() -> Result<FieldMap<Location>, QueryError> {
    let fields = FieldMap::new()
        .add("id", |l: &Location| l.id, true, false)?
        .add("companyId", |l: &Location| l.company_id, true, false)?
        .add("departmentId", |l: &Location| l.department_id, true, false)?
        .add("name", |l: &Location| l.name.clone(), true, true)?
        .add("city", |l: &Location| l.city.clone(), true, true)?
        .add("address", |l: &Location| l.address.clone(), false, true)?
        .add("capacity", |l: &Location| l.capacity, true, true)?
        .add("status", |l: &Location| l.status.to_string(), true, true)?
        .add("openedOn", |l: &Location| l.opened_on, true, true)?
        .add("createdAt", |l: &Location| l.created_at, true, true)?
        .with_includes(IncludeOptions::new(LOCATION_INCLUDES, 2, 3));

    Ok(fields)
}
