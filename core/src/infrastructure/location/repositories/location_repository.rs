use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        location::{entities::Location, ports::LocationRepository},
        query::{
            ports::QuerySource,
            sort::{SortDirection, SortOrder},
            value_objects::{CompiledQuery, FetchedPage},
        },
    },
    infrastructure::memory::table::InMemoryTable,
};

#[derive(Clone)]
pub struct InMemoryLocationRepository {
    table: InMemoryTable<Location>,
}

impl InMemoryLocationRepository {
    pub fn new(locations: Vec<Location>) -> Self {
        let newest_first =
            SortOrder::by("createdAt", |l: &Location| l.created_at, SortDirection::Desc);

        Self {
            table: InMemoryTable::new(locations, newest_first),
        }
    }
}

impl LocationRepository for InMemoryLocationRepository {
    async fn find_page(
        &self,
        query: CompiledQuery<Location>,
    ) -> Result<FetchedPage<Location>, CoreError> {
        self.table.fetch_page(query).await
    }

    async fn get_by_id(&self, location_id: Uuid) -> Result<Option<Location>, CoreError> {
        Ok(self
            .table
            .find_one(|l| l.id == location_id && !l.is_deleted)
            .await)
    }

    async fn find_by_company_ids(
        &self,
        company_ids: Vec<Uuid>,
    ) -> Result<Vec<Location>, CoreError> {
        Ok(self
            .table
            .find(|l| !l.is_deleted && company_ids.contains(&l.company_id))
            .await)
    }

    async fn insert(&self, location: Location) -> Result<Location, CoreError> {
        let location_id = location.id;
        if !self
            .table
            .insert(location.clone(), |l| l.id == location_id)
            .await
        {
            error!("Failed to insert location: id {} already exists", location_id);
            return Err(CoreError::InternalServerError);
        }

        Ok(location)
    }

    async fn soft_delete(&self, location_id: Uuid) -> Result<(), CoreError> {
        let updated = self
            .table
            .update(|l| l.id == location_id && !l.is_deleted, Location::mark_deleted)
            .await;

        if updated == 0 {
            return Err(CoreError::NotFound);
        }

        Ok(())
    }
}
