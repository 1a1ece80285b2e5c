use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{DateTime, Duration, TimeZone, Utc};
use clap::Parser;
use fam_api::{
    application::http::server::{
        api_entities::api_error::ApiErrorResponse, app_state::AppState, http_server::api_router,
    },
    args::Args,
};
use fam_core::{
    application::build_service,
    domain::{
        common::FamConfig,
        company::{entities::Company, value_objects::CompanyDto},
        department::{entities::Department, value_objects::DepartmentDto},
        location::{
            entities::{Location, LocationStatus, NewLocation},
            value_objects::LocationDto,
        },
        query::pagination::PageResult,
    },
    infrastructure::memory::seed::SeedData,
};
use serde_json::json;
use uuid::Uuid;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).single().expect("valid timestamp")
}

/// 25 companies `Company 01`..`Company 25`, created one minute apart.
fn companies() -> Vec<Company> {
    (1..=25)
        .map(|i| {
            let mut company = Company::new(
                format!("Company {i:02}"),
                format!("C{i:02}"),
                (i % 5 == 0).then(|| format!("TAX-{i}")),
                i * 10,
            );
            company.created_at = base_time() + Duration::minutes(i);
            company.updated_at = company.created_at;
            company
        })
        .collect()
}

fn department(company_id: Uuid, name: &str, minutes: i64) -> Department {
    let mut department = Department::new(
        company_id,
        None,
        name.to_string(),
        name.to_uppercase(),
        100.0,
    );
    department.created_at = base_time() + Duration::minutes(minutes);
    department
}

struct Fixture {
    server: TestServer,
    first_company: Company,
    finance: Department,
}

fn fixture() -> Fixture {
    let companies = companies();
    let first_company = companies[0].clone();

    let finance = department(first_company.id, "Finance", 10);
    let departments = vec![
        department(first_company.id, "Alpha", 5),
        finance.clone(),
        department(first_company.id, "Beta", 5),
        department(first_company.id, "Zulu", 1),
    ];

    let locations = vec![Location::new(NewLocation {
        company_id: first_company.id,
        department_id: Some(finance.id),
        name: "Head office".to_string(),
        city: "Lisbon".to_string(),
        address: "Rua Augusta 1".to_string(),
        capacity: 120,
        status: LocationStatus::Active,
        opened_on: None,
    })];

    let args = Arc::new(Args::parse_from(["fam-api"]));
    let seed = SeedData {
        companies,
        departments,
        locations,
    };
    let service =
        build_service(FamConfig::from(args.as_ref().clone()), seed).expect("service builds");
    let router = api_router(AppState::new(args, service)).expect("router builds");

    Fixture {
        server: TestServer::new(router).expect("test server starts"),
        first_company,
        finance,
    }
}

fn names<T>(page: &PageResult<T>, name: impl Fn(&T) -> &str) -> Vec<String> {
    page.items.iter().map(|item| name(item).to_string()).collect()
}

#[tokio::test]
async fn test_health() {
    let fixture = fixture();
    let response = fixture.server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_second_and_last_page_of_twenty_five() {
    let fixture = fixture();

    let response = fixture
        .server
        .get("/companies")
        .add_query_param("sort", "name")
        .add_query_param("page", 2)
        .add_query_param("pageSize", 10)
        .await;
    response.assert_status_ok();
    let page = response.json::<PageResult<CompanyDto>>();
    assert_eq!(page.total_count, 25);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.page, 2);
    assert_eq!(
        names(&page, |c| c.name.as_str()),
        (11..=20).map(|i| format!("Company {i:02}")).collect::<Vec<_>>()
    );

    let last = fixture
        .server
        .get("/companies")
        .add_query_param("sort", "name")
        .add_query_param("page", 3)
        .add_query_param("page_size", 10)
        .await
        .json::<PageResult<CompanyDto>>();
    assert_eq!(last.items.len(), 5);
    assert_eq!(last.page_size, 10);
}

#[tokio::test]
async fn test_unsorted_list_is_newest_first() {
    let fixture = fixture();
    let page = fixture
        .server
        .get("/companies")
        .add_query_param("pageSize", 3)
        .await
        .json::<PageResult<CompanyDto>>();

    assert_eq!(
        names(&page, |c| c.code.as_str()),
        vec!["C25".to_string(), "C24".to_string(), "C23".to_string()]
    );
}

#[tokio::test]
async fn test_out_of_range_page_size_is_clamped() {
    let fixture = fixture();
    let page = fixture
        .server
        .get("/companies")
        .add_query_param("pageSize", 1000)
        .add_query_param("page", 0)
        .await
        .json::<PageResult<CompanyDto>>();

    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 100);
    assert_eq!(page.items.len(), 25);
}

#[tokio::test]
async fn test_descending_then_ascending_sort_keys() {
    let fixture = fixture();
    let page = fixture
        .server
        .get("/departments")
        .add_query_param("sort", "-createdAt,name")
        .await
        .json::<PageResult<DepartmentDto>>();

    assert_eq!(
        names(&page, |d| d.name.as_str()),
        vec!["Finance", "Alpha", "Beta", "Zulu"]
    );
}

#[tokio::test]
async fn test_membership_filter() {
    let fixture = fixture();
    let page = fixture
        .server
        .get("/companies")
        .add_query_param("filter", "@in(code, 'C01', 'C05', 'C99')")
        .add_query_param("sort", "code")
        .await
        .json::<PageResult<CompanyDto>>();

    assert_eq!(page.total_count, 2);
    assert_eq!(names(&page, |c| c.code.as_str()), vec!["C01", "C05"]);
}

#[tokio::test]
async fn test_membership_without_values_matches_nothing() {
    let fixture = fixture();
    let response = fixture
        .server
        .get("/companies")
        .add_query_param("filter", "@in(code)")
        .await;

    response.assert_status_ok();
    let page = response.json::<PageResult<CompanyDto>>();
    assert_eq!(page.total_count, 0);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_combined_filter_with_null_check() {
    let fixture = fixture();
    let page = fixture
        .server
        .get("/companies")
        .add_query_param(
            "filter",
            "@notnull(taxNumber) AND (employeeCount >= 200 OR @contains(name, '05'))",
        )
        .add_query_param("sort", "employeeCount")
        .await
        .json::<PageResult<CompanyDto>>();

    assert_eq!(names(&page, |c| c.code.as_str()), vec!["C05", "C20", "C25"]);
}

#[tokio::test]
async fn test_sort_only_field_cannot_be_filtered() {
    let fixture = fixture();
    let response = fixture
        .server
        .get("/locations")
        .add_query_param("filter", "address == 'Rua Augusta 1'")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<ApiErrorResponse>();
    assert_eq!(body.code, "invalid_query");
    assert_eq!(body.status, 400);
    assert!(body.message.contains("address"));
}

#[tokio::test]
async fn test_parse_error_is_bad_request() {
    let fixture = fixture();
    let response = fixture
        .server
        .get("/companies")
        .add_query_param("filter", "name == 'unterminated")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<ApiErrorResponse>().code, "invalid_query");
}

#[tokio::test]
async fn test_unknown_include_is_bad_request() {
    let fixture = fixture();
    let response = fixture
        .server
        .get("/companies")
        .add_query_param("include", "departments,assets")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<ApiErrorResponse>();
    assert_eq!(body.code, "invalid_query");
    assert!(body.message.contains("assets"));
}

#[tokio::test]
async fn test_nested_include_on_single_location() {
    let fixture = fixture();
    let page = fixture
        .server
        .get("/locations")
        .await
        .json::<PageResult<LocationDto>>();
    let location_id = page.items[0].id;

    let location = fixture
        .server
        .get(&format!("/locations/{location_id}"))
        .add_query_param("include", "department.company")
        .await
        .json::<LocationDto>();

    let department = location.department.expect("department included");
    assert_eq!(department.id, fixture.finance.id);
    assert_eq!(
        department.company.expect("department company included").id,
        fixture.first_company.id
    );
    assert!(location.company.is_none());
}

#[tokio::test]
async fn test_company_departments_include() {
    let fixture = fixture();
    let company = fixture
        .server
        .get(&format!("/companies/{}", fixture.first_company.id))
        .add_query_param("include", "departments")
        .await
        .json::<CompanyDto>();

    assert_eq!(company.departments.map(|d| d.len()), Some(4));
    assert!(company.locations.is_none());
}

#[tokio::test]
async fn test_missing_company_is_not_found() {
    let fixture = fixture();
    let response = fixture
        .server
        .get(&format!("/companies/{}", Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<ApiErrorResponse>().code, "not_found");
}

#[tokio::test]
async fn test_create_then_delete_department() {
    let fixture = fixture();
    let created = fixture
        .server
        .post("/departments")
        .json(&json!({
            "companyId": fixture.first_company.id,
            "parentId": fixture.finance.id,
            "name": "Payroll",
            "code": "PAY",
            "budget": 12.5
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let department = created.json::<DepartmentDto>();
    assert_eq!(department.parent_id, Some(fixture.finance.id));

    fixture
        .server
        .delete(&format!("/departments/{}", department.id))
        .await
        .assert_status_ok();

    let page = fixture
        .server
        .get("/departments")
        .add_query_param("filter", "code == 'PAY'")
        .await
        .json::<PageResult<DepartmentDto>>();
    assert_eq!(page.total_count, 0);
}

#[tokio::test]
async fn test_invalid_create_body_is_rejected() {
    let fixture = fixture();
    let response = fixture
        .server
        .post("/companies")
        .json(&json!({ "name": "", "code": "X", "employeeCount": 1 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<ApiErrorResponse>().code, "invalid_request");
}

#[tokio::test]
async fn test_department_for_unknown_company_is_rejected() {
    let fixture = fixture();
    let response = fixture
        .server
        .post("/departments")
        .json(&json!({
            "companyId": Uuid::new_v4(),
            "name": "Ghost",
            "code": "GST",
            "budget": 0.0
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
