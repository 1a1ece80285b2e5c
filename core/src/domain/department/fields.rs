use crate::domain::{
    department::entities::Department,
    query::{errors::QueryError, field_map::FieldMap, includes::IncludeOptions},
};

pub const DEPARTMENT_INCLUDES: [&str; 3] = ["company", "parent", "parent.company"];

pub fn department_fields() -> Result<FieldMap<Department>, QueryError> {
    let fields = FieldMap::new()
        .add("id", |d: &Department| d.id, true, false)?
        .add("companyId", |d: &Department| d.company_id, true, false)?
        .add("parentId", |d: &Department| d.parent_id, true, false)?
        .add("name", |d: &Department| d.name.clone(), true, true)?
        .add("code", |d: &Department| d.code.clone(), true, true)?
        .add("budget", |d: &Department| d.budget, true, true)?
        .add("isActive", |d: &Department| d.is_active, true, false)?
        .add("createdAt", |d: &Department| d.created_at, true, true)?
        .with_includes(IncludeOptions::new(DEPARTMENT_INCLUDES, 2, 3));

    Ok(fields)
}
