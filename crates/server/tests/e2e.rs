use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes::{self, DepartmentState, EmployeeState};
use service::directory::HttpDepartmentDirectory;

fn cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

async fn memory_db<M: MigratorTrait>() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.expect("connect sqlite");
    M::up(&db, None).await.expect("migrate up");
    db
}

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind");
    let addr: SocketAddr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });
    format!("http://{}:{}", addr.ip(), addr.port())
}

async fn start_department_service() -> String {
    let db = memory_db::<migration::DepartmentMigrator>().await;
    spawn(routes::department_router(DepartmentState { db }, cors())).await
}

async fn start_employee_service(department_base_url: &str) -> String {
    let db = memory_db::<migration::EmployeeMigrator>().await;
    let directory =
        HttpDepartmentDirectory::new(department_base_url, Duration::from_millis(500))
            .expect("directory client");
    let state = EmployeeState {
        db,
        directory: Arc::new(directory),
    };
    spawn(routes::employee_router(state, cors())).await
}

/// Base URL where nothing listens, for "department service down" cases.
async fn dead_base_url() -> String {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}:{}", addr.ip(), addr.port())
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn health_endpoints() {
    let dept = start_department_service().await;
    let emp = start_employee_service(&dept).await;
    let c = client();

    for base in [&dept, &emp] {
        let res = c.get(format!("{base}/health")).send().await.unwrap();
        assert_eq!(res.status(), HttpStatusCode::OK);
        let body = res.json::<serde_json::Value>().await.unwrap();
        assert_eq!(body["status"], "ok");
    }
}

#[tokio::test]
async fn full_lifecycle_with_department_deletion() {
    let dept = start_department_service().await;
    let emp = start_employee_service(&dept).await;
    let c = client();

    // Create department "IT"
    let res = c
        .post(format!("{dept}/departements"))
        .json(&json!({"name": "IT"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let department = res.json::<serde_json::Value>().await.unwrap();
    let department_id = department["id"].as_str().unwrap().to_string();
    assert_eq!(department["name"], "IT");

    // Create employee referencing it; hire date defaults to today
    let res = c
        .post(format!("{emp}/employees"))
        .json(&json!({
            "firstName": "John",
            "lastName": "Doe",
            "email": "j@x.com",
            "position": "Eng",
            "departmentId": department_id,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<serde_json::Value>().await.unwrap();
    let employee_id = created["id"].as_str().unwrap().to_string();
    let today = chrono::Utc::now().date_naive().to_string();
    assert_eq!(created["hireDate"], today.as_str());

    // Enriched fetch
    let res = c
        .get(format!("{emp}/employees/{employee_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::OK);
    let fetched = res.json::<serde_json::Value>().await.unwrap();
    assert_eq!(fetched["department"]["name"], "IT");

    // Delete the department; nothing blocks it
    let res = c
        .delete(format!("{dept}/departements/{department_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    // Dangling reference: employee still readable, department absent
    let res = c
        .get(format!("{emp}/employees/{employee_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::OK);
    let dangling = res.json::<serde_json::Value>().await.unwrap();
    assert!(dangling["department"].is_null());
    assert_eq!(dangling["firstName"], "John");
    assert_eq!(dangling["email"], "j@x.com");
}

#[tokio::test]
async fn create_employee_fails_when_department_missing() {
    let dept = start_department_service().await;
    let emp = start_employee_service(&dept).await;
    let c = client();

    let res = c
        .post(format!("{emp}/employees"))
        .json(&json!({
            "firstName": "John",
            "lastName": "Doe",
            "email": "j@x.com",
            "position": "Eng",
            "departmentId": Uuid::new_v4(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["error"], "Department Not Found");

    // Nothing persisted
    let res = c.get(format!("{emp}/employees")).send().await.unwrap();
    let all = res.json::<serde_json::Value>().await.unwrap();
    assert_eq!(all.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn create_employee_fails_when_department_service_down() {
    let emp = start_employee_service(&dead_base_url().await).await;
    let c = client();

    let res = c
        .post(format!("{emp}/employees"))
        .json(&json!({
            "firstName": "John",
            "lastName": "Doe",
            "email": "j@x.com",
            "position": "Eng",
            "departmentId": Uuid::new_v4(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::SERVICE_UNAVAILABLE);
    let body = res.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["error"], "Department Service Unavailable");
    assert_eq!(body["status"], 503);
}

#[tokio::test]
async fn validation_errors_are_field_level() {
    let dept = start_department_service().await;
    let emp = start_employee_service(&dept).await;
    let c = client();

    let res = c
        .post(format!("{emp}/employees"))
        .json(&json!({
            "firstName": "",
            "lastName": "Doe",
            "email": "not-an-email",
            "position": "Eng",
            "departmentId": Uuid::new_v4(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["error"], "Validation Failed");
    assert_eq!(body["validationErrors"]["firstName"], "First name is required");
    assert_eq!(body["validationErrors"]["email"], "Email should be valid");
}

#[tokio::test]
async fn department_name_conflicts() {
    let dept = start_department_service().await;
    let c = client();

    let res = c
        .post(format!("{dept}/departements"))
        .json(&json!({"name": "HR"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = c
        .post(format!("{dept}/departements"))
        .json(&json!({"name": "HR"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);
    let body = res.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["error"], "Conflict");
}

#[tokio::test]
async fn department_lookup_by_name() {
    let dept = start_department_service().await;
    let c = client();

    let res = c
        .post(format!("{dept}/departements"))
        .json(&json!({"name": "Finance"}))
        .send()
        .await
        .unwrap();
    let created = res.json::<serde_json::Value>().await.unwrap();

    let res = c
        .get(format!("{dept}/departements/by-name/Finance"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::OK);
    let found = res.json::<serde_json::Value>().await.unwrap();
    assert_eq!(found["id"], created["id"]);

    let res = c
        .get(format!("{dept}/departements/by-name/Nope"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn by_department_distinguishes_empty_from_missing() {
    let dept = start_department_service().await;
    let emp = start_employee_service(&dept).await;
    let c = client();

    // Existing but empty department -> 200 with empty list
    let res = c
        .post(format!("{dept}/departements"))
        .json(&json!({"name": "Legal"}))
        .send()
        .await
        .unwrap();
    let department = res.json::<serde_json::Value>().await.unwrap();
    let department_id = department["id"].as_str().unwrap();

    let res = c
        .get(format!("{emp}/employees/department/{department_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::OK);
    let members = res.json::<serde_json::Value>().await.unwrap();
    assert_eq!(members.as_array().unwrap().len(), 0);

    // Missing department -> 404, not an empty list
    let res = c
        .get(format!("{emp}/employees/department/{}", Uuid::new_v4()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_and_by_email_routes() {
    let dept = start_department_service().await;
    let emp = start_employee_service(&dept).await;
    let c = client();

    let res = c
        .post(format!("{dept}/departements"))
        .json(&json!({"name": "IT"}))
        .send()
        .await
        .unwrap();
    let department = res.json::<serde_json::Value>().await.unwrap();
    let department_id = department["id"].as_str().unwrap();

    let res = c
        .post(format!("{emp}/employees"))
        .json(&json!({
            "firstName": "Alice",
            "lastName": "Smith",
            "email": "alice@x.com",
            "position": "Eng",
            "departmentId": department_id,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = c
        .get(format!("{emp}/employees/search?name=ali"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::OK);
    let hits = res.json::<serde_json::Value>().await.unwrap();
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["firstName"], "Alice");

    let res = c
        .get(format!("{emp}/employees/by-email/alice@x.com"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::OK);
    let found = res.json::<serde_json::Value>().await.unwrap();
    assert_eq!(found["lastName"], "Smith");
    assert_eq!(found["department"]["name"], "IT");
}
