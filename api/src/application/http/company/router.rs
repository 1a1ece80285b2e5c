use axum::{Router, routing::get};
use utoipa::OpenApi;

use super::handlers::create_company::{__path_create_company, create_company};
use super::handlers::delete_company::{__path_delete_company, delete_company};
use super::handlers::get_companies::{__path_get_companies, get_companies};
use super::handlers::get_company::{__path_get_company, get_company};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_companies, get_company, create_company, delete_company))]
pub struct CompanyApiDoc;

pub fn company_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/companies", state.args.server.root_path),
            get(get_companies).post(create_company),
        )
        .route(
            &format!("{}/companies/{{company_id}}", state.args.server.root_path),
            get(get_company).delete(delete_company),
        )
}
