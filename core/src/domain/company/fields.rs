use crate::domain::{
    company::entities::Company,
    query::{errors::QueryError, field_map::FieldMap, includes::IncludeOptions},
};

pub const COMPANY_INCLUDES: [&str; 2] = ["departments", "locations"];

pub fn company_fields() -> Result<FieldMap<Company>, QueryError> {
    let fields = FieldMap::new()
        .add("id", |c: &Company| c.id, true, false)?
        .add("name", |c: &Company| c.name.clone(), true, true)?
        .add("code", |c: &Company| c.code.clone(), true, true)?
        .add("taxNumber", |c: &Company| c.tax_number.clone(), true, false)?
        .add("employeeCount", |c: &Company| c.employee_count, true, true)?
        .add("isActive", |c: &Company| c.is_active, true, false)?
        .add("createdAt", |c: &Company| c.created_at, true, true)?
        .add("updatedAt", |c: &Company| c.updated_at, true, true)?
        .with_includes(IncludeOptions::new(COMPANY_INCLUDES, 1, 2));

    Ok(fields)
}
