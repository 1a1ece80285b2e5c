use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        company::{entities::Company, ports::CompanyRepository},
        query::{
            ports::QuerySource,
            sort::{SortDirection, SortOrder},
            value_objects::{CompiledQuery, FetchedPage},
        },
    },
    infrastructure::memory::table::InMemoryTable,
};

#[derive(Clone)]
pub struct InMemoryCompanyRepository {
    table: InMemoryTable<Company>,
}

impl InMemoryCompanyRepository {
    pub fn new(companies: Vec<Company>) -> Self {
        let newest_first =
            SortOrder::by("createdAt", |c: &Company| c.created_at, SortDirection::Desc);

        Self {
            table: InMemoryTable::new(companies, newest_first),
        }
    }
}

impl CompanyRepository for InMemoryCompanyRepository {
    async fn find_page(
        &self,
        query: CompiledQuery<Company>,
    ) -> Result<FetchedPage<Company>, CoreError> {
        self.table.fetch_page(query).await
    }

    async fn get_by_id(&self, company_id: Uuid) -> Result<Option<Company>, CoreError> {
        Ok(self
            .table
            .find_one(|c| c.id == company_id && !c.is_deleted)
            .await)
    }

    async fn get_by_ids(&self, company_ids: Vec<Uuid>) -> Result<Vec<Company>, CoreError> {
        Ok(self
            .table
            .find(|c| !c.is_deleted && company_ids.contains(&c.id))
            .await)
    }

    async fn insert(&self, company: Company) -> Result<Company, CoreError> {
        let company_id = company.id;
        if !self.table.insert(company.clone(), |c| c.id == company_id).await {
            error!("Failed to insert company: id {} already exists", company_id);
            return Err(CoreError::InternalServerError);
        }

        Ok(company)
    }

    async fn soft_delete(&self, company_id: Uuid) -> Result<(), CoreError> {
        let updated = self
            .table
            .update(|c| c.id == company_id && !c.is_deleted, Company::mark_deleted)
            .await;

        if updated == 0 {
            return Err(CoreError::NotFound);
        }

        Ok(())
    }
}
