use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    department::{
        entities::Department,
        value_objects::{CreateDepartmentInput, DepartmentDto},
    },
    query::{
        pagination::PageResult,
        value_objects::{CompiledQuery, FetchedPage, QueryRequest},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait DepartmentService: Send + Sync {
    fn get_departments(
        &self,
        request: QueryRequest,
    ) -> impl Future<Output = Result<PageResult<DepartmentDto>, CoreError>> + Send;

    fn get_department(
        &self,
        department_id: Uuid,
        include: Option<String>,
    ) -> impl Future<Output = Result<DepartmentDto, CoreError>> + Send;

    fn create_department(
        &self,
        input: CreateDepartmentInput,
    ) -> impl Future<Output = Result<DepartmentDto, CoreError>> + Send;

    fn delete_department(
        &self,
        department_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait DepartmentRepository: Send + Sync {
    fn find_page(
        &self,
        query: CompiledQuery<Department>,
    ) -> impl Future<Output = Result<FetchedPage<Department>, CoreError>> + Send;

    /// Deleted departments are never returned by the lookups below.
    fn get_by_id(
        &self,
        department_id: Uuid,
    ) -> impl Future<Output = Result<Option<Department>, CoreError>> + Send;

    fn get_by_ids(
        &self,
        department_ids: Vec<Uuid>,
    ) -> impl Future<Output = Result<Vec<Department>, CoreError>> + Send;

    fn find_by_company_ids(
        &self,
        company_ids: Vec<Uuid>,
    ) -> impl Future<Output = Result<Vec<Department>, CoreError>> + Send;

    fn insert(
        &self,
        department: Department,
    ) -> impl Future<Output = Result<Department, CoreError>> + Send;

    fn soft_delete(
        &self,
        department_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
