use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    location::{
        entities::Location,
        value_objects::{CreateLocationInput, LocationDto},
    },
    query::{
        pagination::PageResult,
        value_objects::{CompiledQuery, FetchedPage, QueryRequest},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait LocationService: Send + Sync {
    fn get_locations(
        &self,
        request: QueryRequest,
    ) -> impl Future<Output = Result<PageResult<LocationDto>, CoreError>> + Send;

    fn get_location(
        &self,
        location_id: Uuid,
        include: Option<String>,
    ) -> impl Future<Output = Result<LocationDto, CoreError>> + Send;

    fn create_location(
        &self,
        input: CreateLocationInput,
    ) -> impl Future<Output = Result<LocationDto, CoreError>> + Send;

    fn delete_location(
        &self,
        location_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait LocationRepository: Send + Sync {
    fn find_page(
        &self,
        query: CompiledQuery<Location>,
    ) -> impl Future<Output = Result<FetchedPage<Location>, CoreError>> + Send;

    /// Deleted locations are never returned by the lookups below.
    fn get_by_id(
        &self,
        location_id: Uuid,
    ) -> impl Future<Output = Result<Option<Location>, CoreError>> + Send;

    fn find_by_company_ids(
        &self,
        company_ids: Vec<Uuid>,
    ) -> impl Future<Output = Result<Vec<Location>, CoreError>> + Send;

    fn insert(
        &self,
        location: Location,
    ) -> impl Future<Output = Result<Location, CoreError>> + Send;

    fn soft_delete(
        &self,
        location_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
