use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    company::{
        entities::Company,
        value_objects::{CompanyDto, CreateCompanyInput},
    },
    query::{
        pagination::PageResult,
        value_objects::{CompiledQuery, FetchedPage, QueryRequest},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait CompanyService: Send + Sync {
    fn get_companies(
        &self,
        request: QueryRequest,
    ) -> impl Future<Output = Result<PageResult<CompanyDto>, CoreError>> + Send;

    fn get_company(
        &self,
        company_id: Uuid,
        include: Option<String>,
    ) -> impl Future<Output = Result<CompanyDto, CoreError>> + Send;

    fn create_company(
        &self,
        input: CreateCompanyInput,
    ) -> impl Future<Output = Result<CompanyDto, CoreError>> + Send;

    fn delete_company(&self, company_id: Uuid)
    -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait CompanyRepository: Send + Sync {
    /// Soft-deleted rows are only excluded when the query's predicate says so.
    fn find_page(
        &self,
        query: CompiledQuery<Company>,
    ) -> impl Future<Output = Result<FetchedPage<Company>, CoreError>> + Send;

    /// Deleted companies are never returned here or by `get_by_ids`.
    fn get_by_id(
        &self,
        company_id: Uuid,
    ) -> impl Future<Output = Result<Option<Company>, CoreError>> + Send;

    fn get_by_ids(
        &self,
        company_ids: Vec<Uuid>,
    ) -> impl Future<Output = Result<Vec<Company>, CoreError>> + Send;

    fn insert(&self, company: Company) -> impl Future<Output = Result<Company, CoreError>> + Send;

    fn soft_delete(&self, company_id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;
}
