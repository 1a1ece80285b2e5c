use axum::extract::{Path, Query, State};
use fam_core::domain::location::{ports::LocationService, value_objects::LocationDto};
use uuid::Uuid;

use crate::application::http::{
    query_params::IncludeQueryParams,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/{location_id}",
    tag = "location",
    summary = "Get location",
    params(
        ("location_id" = Uuid, Path, description = "Location ID"),
        IncludeQueryParams
    ),
    responses(
        (status = 200, body = LocationDto),
        (status = 404, description = "Location not found")
    ),
)]
pub async fn get_location(
    Path(location_id): Path<Uuid>,
    Query(query): Query<IncludeQueryParams>,
    State(state): State<AppState>,
) -> Result<Response<LocationDto>, ApiError> {
    let location = state
        .service
        .get_location(location_id, query.include)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(location))
}
