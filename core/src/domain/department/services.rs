use std::collections::HashMap;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{
    common::{
        entities::app_errors::CoreError,
        services::{Service, distinct_ids},
    },
    company::ports::CompanyRepository,
    department::{
        entities::Department,
        ports::{DepartmentRepository, DepartmentService},
        value_objects::{CreateDepartmentInput, DepartmentDto, DepartmentRef},
    },
    location::ports::LocationRepository,
    query::{
        binder::Predicate, includes::IncludeSet, pagination::PageResult,
        value_objects::QueryRequest,
    },
};

fn not_deleted() -> Predicate<Department> {
    Predicate::new(|department: &Department| !department.is_deleted)
}

impl<CO, DE, LO> Service<CO, DE, LO>
where
    CO: CompanyRepository,
    DE: DepartmentRepository,
    LO: LocationRepository,
{
    /// Loads departments by id, each with its company when `with_company` is set.
    pub(crate) async fn department_refs(
        &self,
        department_ids: Vec<Uuid>,
        with_company: bool,
    ) -> Result<HashMap<Uuid, DepartmentRef>, CoreError> {
        if department_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let departments = self
            .department_repository
            .get_by_ids(distinct_ids(department_ids))
            .await?;

        let companies = if with_company {
            self.company_summaries(departments.iter().map(|d| d.company_id).collect())
                .await?
        } else {
            HashMap::new()
        };

        Ok(departments
            .iter()
            .map(|department| {
                let company = companies.get(&department.company_id).cloned();
                (department.id, DepartmentRef::new(department, company))
            })
            .collect())
    }

    async fn department_dtos(
        &self,
        departments: &[Department],
        includes: &IncludeSet,
    ) -> Result<Vec<DepartmentDto>, CoreError> {
        let with_company = includes.contains("company");
        let with_parent_company = includes.contains("parent.company");
        let with_parent = with_parent_company || includes.contains("parent");

        let company_ids = if with_company {
            departments.iter().map(|d| d.company_id).collect()
        } else {
            Vec::new()
        };
        let parent_ids = if with_parent {
            departments.iter().filter_map(|d| d.parent_id).collect()
        } else {
            Vec::new()
        };

        let (companies, parents) = futures::try_join!(
            self.company_summaries(company_ids),
            self.department_refs(parent_ids, with_parent_company),
        )?;

        Ok(departments
            .iter()
            .map(|department| {
                let mut dto = DepartmentDto::from(department);
                if with_company {
                    dto.company = companies.get(&department.company_id).cloned();
                }
                if with_parent {
                    dto.parent = department
                        .parent_id
                        .and_then(|parent_id| parents.get(&parent_id).cloned());
                }
                dto
            })
            .collect())
    }
}

impl<CO, DE, LO> DepartmentService for Service<CO, DE, LO>
where
    CO: CompanyRepository,
    DE: DepartmentRepository,
    LO: LocationRepository,
{
    #[instrument(skip(self))]
    async fn get_departments(
        &self,
        request: QueryRequest,
    ) -> Result<PageResult<DepartmentDto>, CoreError> {
        let query = self
            .query_compiler
            .compile(&request, &self.schemas.departments)?
            .and_filter(not_deleted());
        let pagination = query.pagination;
        let includes = query.includes.clone();

        let page = self.department_repository.find_page(query).await?;
        let items = self.department_dtos(&page.items, &includes).await?;

        Ok(PageResult::new(items, pagination, page.total_count))
    }

    #[instrument(skip(self))]
    async fn get_department(
        &self,
        department_id: Uuid,
        include: Option<String>,
    ) -> Result<DepartmentDto, CoreError> {
        let includes = self
            .schemas
            .departments
            .parse_includes(include.as_deref())?;

        let department = self
            .department_repository
            .get_by_id(department_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        self.department_dtos(std::slice::from_ref(&department), &includes)
            .await?
            .pop()
            .ok_or(CoreError::NotFound)
    }

    #[instrument(skip(self), fields(company_id = %input.company_id, code = %input.code))]
    async fn create_department(
        &self,
        input: CreateDepartmentInput,
    ) -> Result<DepartmentDto, CoreError> {
        let _guard = self.lock_references().await;

        let company = self
            .company_repository
            .get_by_id(input.company_id)
            .await?
            .ok_or_else(|| {
                CoreError::Invalid(format!("company {} does not exist", input.company_id))
            })?;

        if let Some(parent_id) = input.parent_id {
            let parent = self
                .department_repository
                .get_by_id(parent_id)
                .await?
                .ok_or_else(|| {
                    CoreError::Invalid(format!("parent department {parent_id} does not exist"))
                })?;

            if parent.company_id != company.id {
                return Err(CoreError::Invalid(format!(
                    "parent department {parent_id} belongs to another company"
                )));
            }
        }

        let department = Department::new(
            company.id,
            input.parent_id,
            input.name,
            input.code,
            input.budget,
        );

        let created = self.department_repository.insert(department).await?;
        info!(department_id = %created.id, "department created");

        Ok(DepartmentDto::from(&created))
    }

    #[instrument(skip(self))]
    async fn delete_department(&self, department_id: Uuid) -> Result<(), CoreError> {
        let _guard = self.lock_references().await;

        self.department_repository
            .get_by_id(department_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        self.department_repository.soft_delete(department_id).await?;
        info!(%department_id, "department deleted");

        Ok(())
    }
}
