use std::{collections::BTreeSet, sync::Arc};

use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::domain::{
    company::{entities::Company, fields::company_fields, ports::CompanyRepository},
    department::{entities::Department, fields::department_fields, ports::DepartmentRepository},
    location::{entities::Location, fields::location_fields, ports::LocationRepository},
    query::{errors::QueryError, field_map::FieldMap, services::QueryCompiler},
};

/// Field maps for every queryable entity, built once at startup.
#[derive(Debug)]
pub struct QuerySchemas {
    pub companies: FieldMap<Company>,
    pub departments: FieldMap<Department>,
    pub locations: FieldMap<Location>,
}

impl QuerySchemas {
    pub fn new() -> Result<Self, QueryError> {
        Ok(Self {
            companies: company_fields()?,
            departments: department_fields()?,
            locations: location_fields()?,
        })
    }
}

pub(crate) fn distinct_ids(ids: impl IntoIterator<Item = Uuid>) -> Vec<Uuid> {
    ids.into_iter().collect::<BTreeSet<Uuid>>().into_iter().collect()
}

pub struct Service<CO, DE, LO>
where
    CO: CompanyRepository,
    DE: DepartmentRepository,
    LO: LocationRepository,
{
    pub(crate) company_repository: Arc<CO>,
    pub(crate) department_repository: Arc<DE>,
    pub(crate) location_repository: Arc<LO>,
    pub(crate) query_compiler: QueryCompiler,
    pub(crate) schemas: Arc<QuerySchemas>,
    /// Held across the check and the write of operations that depend on
    /// rows in another table.
    reference_lock: Arc<Mutex<()>>,
}

impl<CO, DE, LO> Service<CO, DE, LO>
where
    CO: CompanyRepository,
    DE: DepartmentRepository,
    LO: LocationRepository,
{
    pub fn new(
        company_repository: CO,
        department_repository: DE,
        location_repository: LO,
        query_compiler: QueryCompiler,
        schemas: QuerySchemas,
    ) -> Self {
        Self {
            company_repository: Arc::new(company_repository),
            department_repository: Arc::new(department_repository),
            location_repository: Arc::new(location_repository),
            query_compiler,
            schemas: Arc::new(schemas),
            reference_lock: Arc::new(Mutex::new(())),
        }
    }

    pub(crate) async fn lock_references(&self) -> MutexGuard<'_, ()> {
        self.reference_lock.lock().await
    }
}

impl<CO, DE, LO> Clone for Service<CO, DE, LO>
where
    CO: CompanyRepository,
    DE: DepartmentRepository,
    LO: LocationRepository,
{
    fn clone(&self) -> Self {
        Self {
            company_repository: Arc::clone(&self.company_repository),
            department_repository: Arc::clone(&self.department_repository),
            location_repository: Arc::clone(&self.location_repository),
            query_compiler: self.query_compiler.clone(),
            schemas: Arc::clone(&self.schemas),
            reference_lock: Arc::clone(&self.reference_lock),
        }
    }
}
