use axum::extract::State;
use fam_core::domain::location::{
    ports::LocationService,
    value_objects::{CreateLocationInput, LocationDto},
};

use crate::application::http::{
    location::validators::CreateLocationValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "",
    tag = "location",
    summary = "Create location",
    request_body = CreateLocationValidator,
    responses(
        (status = 201, body = LocationDto),
        (status = 400, description = "Invalid body or unknown references")
    ),
)]
pub async fn create_location(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<CreateLocationValidator>,
) -> Result<Response<LocationDto>, ApiError> {
    let location = state
        .service
        .create_location(CreateLocationInput {
            company_id: payload.company_id,
            department_id: payload.department_id,
            name: payload.name,
            city: payload.city,
            address: payload.address,
            capacity: payload.capacity,
            status: payload.status,
            opened_on: payload.opened_on,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(location))
}
