use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        department::{entities::Department, ports::DepartmentRepository},
        query::{
            ports::QuerySource,
            sort::{SortDirection, SortOrder},
            value_objects::{CompiledQuery, FetchedPage},
        },
    },
    infrastructure::memory::table::InMemoryTable,
};

#[derive(Clone)]
pub struct InMemoryDepartmentRepository {
    table: InMemoryTable<Department>,
}

impl InMemoryDepartmentRepository {
    pub fn new(departments: Vec<Department>) -> Self {
        let newest_first =
            SortOrder::by("createdAt", |d: &Department| d.created_at, SortDirection::Desc);

        Self {
            table: InMemoryTable::new(departments, newest_first),
        }
    }
}

impl DepartmentRepository for InMemoryDepartmentRepository {
    async fn find_page(
        &self,
        query: CompiledQuery<Department>,
    ) -> Result<FetchedPage<Department>, CoreError> {
        self.table.fetch_page(query).await
    }

    async fn get_by_id(&self, department_id: Uuid) -> Result<Option<Department>, CoreError> {
        Ok(self
            .table
            .find_one(|d| d.id == department_id && !d.is_deleted)
            .await)
    }

    async fn get_by_ids(&self, department_ids: Vec<Uuid>) -> Result<Vec<Department>, CoreError> {
        Ok(self
            .table
            .find(|d| !d.is_deleted && department_ids.contains(&d.id))
            .await)
    }

    async fn find_by_company_ids(
        &self,
        company_ids: Vec<Uuid>,
    ) -> Result<Vec<Department>, CoreError> {
        Ok(self
            .table
            .find(|d| !d.is_deleted && company_ids.contains(&d.company_id))
            .await)
    }

    async fn insert(&self, department: Department) -> Result<Department, CoreError> {
        let department_id = department.id;
        if !self
            .table
            .insert(department.clone(), |d| d.id == department_id)
            .await
        {
            error!("Failed to insert department: id {} already exists", department_id);
            return Err(CoreError::InternalServerError);
        }

        Ok(department)
    }

    async fn soft_delete(&self, department_id: Uuid) -> Result<(), CoreError> {
        let updated = self
            .table
            .update(
                |d| d.id == department_id && !d.is_deleted,
                Department::mark_deleted,
            )
            .await;

        if updated == 0 {
            return Err(CoreError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_by_company_ids_skips_deleted_departments() {
        let company_id = Uuid::new_v4();
        let finance = Department::new(
            company_id,
            None,
            "Finance".to_string(),
            "FIN".to_string(),
            1.0,
        );
        let legal = Department::new(company_id, None, "Legal".to_string(), "LGL".to_string(), 2.0);
        let elsewhere =
            Department::new(Uuid::new_v4(), None, "Ops".to_string(), "OPS".to_string(), 3.0);
        let repository =
            InMemoryDepartmentRepository::new(vec![finance.clone(), legal.clone(), elsewhere]);

        repository.soft_delete(legal.id).await.expect("deleted");

        let found = repository
            .find_by_company_ids(vec![company_id])
            .await
            .expect("lookup succeeds");
        assert_eq!(found, vec![finance]);
    }
}
