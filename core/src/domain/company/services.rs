use std::collections::HashMap;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{
    common::{
        entities::app_errors::CoreError,
        services::{Service, distinct_ids},
    },
    company::{
        entities::Company,
        ports::{CompanyRepository, CompanyService},
        value_objects::{CompanyDto, CompanySummary, CreateCompanyInput},
    },
    department::{ports::DepartmentRepository, value_objects::DepartmentSummary},
    location::{ports::LocationRepository, value_objects::LocationSummary},
    query::{
        binder::Predicate, includes::IncludeSet, pagination::PageResult,
        value_objects::QueryRequest,
    },
};

fn not_deleted() -> Predicate<Company> {
    Predicate::new(|company: &Company| !company.is_deleted)
}

impl<CO, DE, LO> Service<CO, DE, LO>
where
    CO: CompanyRepository,
    DE: DepartmentRepository,
    LO: LocationRepository,
{
    pub(crate) async fn company_summaries(
        &self,
        company_ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, CompanySummary>, CoreError> {
        if company_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let companies = self
            .company_repository
            .get_by_ids(distinct_ids(company_ids))
            .await?;

        Ok(companies
            .iter()
            .map(|company| (company.id, CompanySummary::from(company)))
            .collect())
    }

    async fn company_dtos(
        &self,
        companies: &[Company],
        includes: &IncludeSet,
    ) -> Result<Vec<CompanyDto>, CoreError> {
        let with_departments = includes.contains("departments");
        let with_locations = includes.contains("locations");
        if companies.is_empty() || !(with_departments || with_locations) {
            return Ok(companies.iter().map(CompanyDto::from).collect());
        }

        let company_ids: Vec<Uuid> = companies.iter().map(|company| company.id).collect();
        let (departments, locations) = futures::try_join!(
            async {
                if with_departments {
                    self.department_repository
                        .find_by_company_ids(company_ids.clone())
                        .await
                } else {
                    Ok(Vec::new())
                }
            },
            async {
                if with_locations {
                    self.location_repository
                        .find_by_company_ids(company_ids.clone())
                        .await
                } else {
                    Ok(Vec::new())
                }
            },
        )?;

        let mut departments_by_company: HashMap<Uuid, Vec<DepartmentSummary>> = HashMap::new();
        for department in &departments {
            departments_by_company
                .entry(department.company_id)
                .or_default()
                .push(DepartmentSummary::from(department));
        }

        let mut locations_by_company: HashMap<Uuid, Vec<LocationSummary>> = HashMap::new();
        for location in &locations {
            locations_by_company
                .entry(location.company_id)
                .or_default()
                .push(LocationSummary::from(location));
        }

        Ok(companies
            .iter()
            .map(|company| {
                let mut dto = CompanyDto::from(company);
                if with_departments {
                    dto.departments = Some(
                        departments_by_company
                            .get(&company.id)
                            .cloned()
                            .unwrap_or_default(),
                    );
                }
                if with_locations {
                    dto.locations = Some(
                        locations_by_company
                            .get(&company.id)
                            .cloned()
                            .unwrap_or_default(),
                    );
                }
                dto
            })
            .collect())
    }
}

impl<CO, DE, LO> CompanyService for Service<CO, DE, LO>
where
    CO: CompanyRepository,
    DE: DepartmentRepository,
    LO: LocationRepository,
{
    #[instrument(skip(self))]
    async fn get_companies(
        &self,
        request: QueryRequest,
    ) -> Result<PageResult<CompanyDto>, CoreError> {
        let query = self
            .query_compiler
            .compile(&request, &self.schemas.companies)?
            .and_filter(not_deleted());
        let pagination = query.pagination;
        let includes = query.includes.clone();

        let page = self.company_repository.find_page(query).await?;
        let items = self.company_dtos(&page.items, &includes).await?;

        Ok(PageResult::new(items, pagination, page.total_count))
    }

    #[instrument(skip(self))]
    async fn get_company(
        &self,
        company_id: Uuid,
        include: Option<String>,
    ) -> Result<CompanyDto, CoreError> {
        let includes = self
            .schemas
            .companies
            .parse_includes(include.as_deref())?;

        let company = self
            .company_repository
            .get_by_id(company_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        self.company_dtos(std::slice::from_ref(&company), &includes)
            .await?
            .pop()
            .ok_or(CoreError::NotFound)
    }

    #[instrument(skip(self), fields(code = %input.code))]
    async fn create_company(&self, input: CreateCompanyInput) -> Result<CompanyDto, CoreError> {
        let company = Company::new(
            input.name,
            input.code,
            input.tax_number,
            input.employee_count,
        );

        let created = self.company_repository.insert(company).await?;
        info!(company_id = %created.id, "company created");

        Ok(CompanyDto::from(&created))
    }

    #[instrument(skip(self))]
    async fn delete_company(&self, company_id: Uuid) -> Result<(), CoreError> {
        let _guard = self.lock_references().await;

        self.company_repository
            .get_by_id(company_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        let departments = self
            .department_repository
            .find_by_company_ids(vec![company_id])
            .await?;
        if !departments.is_empty() {
            return Err(CoreError::Invalid(format!(
                "company {company_id} still has {} department(s)",
                departments.len()
            )));
        }

        let locations = self
            .location_repository
            .find_by_company_ids(vec![company_id])
            .await?;
        if !locations.is_empty() {
            return Err(CoreError::Invalid(format!(
                "company {company_id} still has {} location(s)",
                locations.len()
            )));
        }

        self.company_repository.soft_delete(company_id).await?;
        info!(%company_id, "company deleted");

        Ok(())
    }
}
