use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    company::ports::CompanyRepository,
    department::ports::DepartmentRepository,
    location::{
        entities::{Location, NewLocation},
        ports::{LocationRepository, LocationService},
        value_objects::{CreateLocationInput, LocationDto},
    },
    query::{
        binder::Predicate, includes::IncludeSet, pagination::PageResult,
        value_objects::QueryRequest,
    },
};

fn not_deleted() -> Predicate<Location> {
    Predicate::new(|location: &Location| !location.is_deleted)
}

impl<CO, DE, LO> Service<CO, DE, LO>
where
    CO: CompanyRepository,
    DE: DepartmentRepository,
    LO: LocationRepository,
{
    async fn location_dtos(
        &self,
        locations: &[Location],
        includes: &IncludeSet,
    ) -> Result<Vec<LocationDto>, CoreError> {
        let with_company = includes.contains("company");
        let with_department_company = includes.contains("department.company");
        let with_department = with_department_company || includes.contains("department");

        let company_ids = if with_company {
            locations.iter().map(|l| l.company_id).collect()
        } else {
            Vec::new()
        };
        let department_ids = if with_department {
            locations.iter().filter_map(|l| l.department_id).collect()
        } else {
            Vec::new()
        };

        let (companies, departments) = futures::try_join!(
            self.company_summaries(company_ids),
            self.department_refs(department_ids, with_department_company),
        )?;

        Ok(locations
            .iter()
            .map(|location| {
                let mut dto = LocationDto::from(location);
                if with_company {
                    dto.company = companies.get(&location.company_id).cloned();
                }
                if with_department {
                    dto.department = location
                        .department_id
                        .and_then(|department_id| departments.get(&department_id).cloned());
                }
                dto
            })
            .collect())
    }
}

impl<CO, DE, LO> LocationService for Service<CO, DE, LO>
where
    CO: CompanyRepository,
    DE: DepartmentRepository,
    LO: LocationRepository,
{
    #[instrument(skip(self))]
    async fn get_locations(
        &self,
        request: QueryRequest,
    ) -> Result<PageResult<LocationDto>, CoreError> {
        let query = self
            .query_compiler
            .compile(&request, &self.schemas.locations)?
            .and_filter(not_deleted());
        let pagination = query.pagination;
        let includes = query.includes.clone();

        let page = self.location_repository.find_page(query).await?;
        let items = self.location_dtos(&page.items, &includes).await?;

        Ok(PageResult::new(items, pagination, page.total_count))
    }

    #[instrument(skip(self))]
    async fn get_location(
        &self,
        location_id: Uuid,
        include: Option<String>,
    ) -> Result<LocationDto, CoreError> {
        let includes = self
            .schemas
            .locations
            .parse_includes(include.as_deref())?;

        let location = self
            .location_repository
            .get_by_id(location_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        self.location_dtos(std::slice::from_ref(&location), &includes)
            .await?
            .pop()
            .ok_or(CoreError::NotFound)
    }

    #[instrument(skip(self), fields(company_id = %input.company_id, name = %input.name))]
    async fn create_location(
        &self,
        input: CreateLocationInput,
    ) -> Result<LocationDto, CoreError> {
        let _guard = self.lock_references().await;

        let company = self
            .company_repository
            .get_by_id(input.company_id)
            .await?
            .ok_or_else(|| {
                CoreError::Invalid(format!("company {} does not exist", input.company_id))
            })?;

        if let Some(department_id) = input.department_id {
            let department = self
                .department_repository
                .get_by_id(department_id)
                .await?
                .ok_or_else(|| {
                    CoreError::Invalid(format!("department {department_id} does not exist"))
                })?;

            if department.company_id != company.id {
                return Err(CoreError::Invalid(format!(
                    "department {department_id} belongs to another company"
                )));
            }
        }

        let location = Location::new(NewLocation {
            company_id: company.id,
            department_id: input.department_id,
            name: input.name,
            city: input.city,
            address: input.address,
            capacity: input.capacity,
            status: input.status,
            opened_on: input.opened_on,
        });

        let created = self.location_repository.insert(location).await?;
        info!(location_id = %created.id, "location created");

        Ok(LocationDto::from(&created))
    }

    #[instrument(skip(self))]
    async fn delete_location(&self, location_id: Uuid) -> Result<(), CoreError> {
        self.location_repository
            .get_by_id(location_id)
            .await?
            .ok_or(CoreError::NotFound)?;

        self.location_repository.soft_delete(location_id).await?;
        info!(%location_id, "location deleted");

        Ok(())
    }
}
