use tracing::info;

use crate::{
    domain::{
        common::{FamConfig, services::{QuerySchemas, Service}},
        query::services::QueryCompiler,
    },
    infrastructure::{
        company::repositories::company_repository::InMemoryCompanyRepository,
        department::repositories::department_repository::InMemoryDepartmentRepository,
        location::repositories::location_repository::InMemoryLocationRepository,
        memory::seed::SeedData,
    },
};

pub type FamService =
    Service<InMemoryCompanyRepository, InMemoryDepartmentRepository, InMemoryLocationRepository>;

/// Builds the service, loading seed rows from the configured file if any.
pub async fn create_service(config: FamConfig) -> Result<FamService, anyhow::Error> {
    let seed = match &config.seed.file {
        Some(path) => SeedData::load(path).await?,
        None => SeedData::default(),
    };

    build_service(config, seed)
}

pub fn build_service(config: FamConfig, seed: SeedData) -> Result<FamService, anyhow::Error> {
    let schemas = QuerySchemas::new()?;

    info!(
        max_page_size = config.query.max_page_size,
        max_filter_depth = config.query.max_filter_depth,
        strict_sort = config.query.strict_sort,
        "query engine configured"
    );

    Ok(Service::new(
        InMemoryCompanyRepository::new(seed.companies),
        InMemoryDepartmentRepository::new(seed.departments),
        InMemoryLocationRepository::new(seed.locations),
        QueryCompiler::new(config.query),
        schemas,
    ))
}
