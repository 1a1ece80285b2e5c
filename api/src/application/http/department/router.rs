use axum::{Router, routing::get};
use utoipa::OpenApi;

use super::handlers::create_department::{__path_create_department, create_department};
use super::handlers::delete_department::{__path_delete_department, delete_department};
use super::handlers::get_department::{__path_get_department, get_department};
use super::handlers::get_departments::{__path_get_departments, get_departments};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_departments, get_department, create_department, delete_department))]
pub struct DepartmentApiDoc;

pub fn department_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/departments", state.args.server.root_path),
            get(get_departments).post(create_department),
        )
        .route(
            &format!("{}/departments/{{department_id}}", state.args.server.root_path),
            get(get_department).delete(delete_department),
        )
}
