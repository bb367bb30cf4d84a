use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::directory::DepartmentDirectory;

pub mod departments;
pub mod employees;

#[derive(Clone)]
pub struct DepartmentState {
    pub db: DatabaseConnection,
}

#[derive(Clone)]
pub struct EmployeeState {
    pub db: DatabaseConnection,
    pub directory: Arc<dyn DepartmentDirectory>,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Router for the department service.
pub fn department_router(state: DepartmentState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/departements",
            post(departments::create).get(departments::list),
        )
        .route(
            "/departements/:id",
            get(departments::get_by_id)
                .put(departments::update)
                .delete(departments::remove),
        )
        .route("/departements/by-name/:name", get(departments::get_by_name))
        .with_state(state)
        .layer(cors)
        .layer(trace_layer())
}

/// Router for the employee service.
pub fn employee_router(state: EmployeeState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/employees", post(employees::create).get(employees::list))
        .route(
            "/employees/:id",
            get(employees::get_by_id)
                .put(employees::update)
                .delete(employees::remove),
        )
        .route(
            "/employees/department/:department_id",
            get(employees::by_department),
        )
        .route("/employees/search", get(employees::search))
        .route("/employees/by-email/:email", get(employees::by_email))
        .with_state(state)
        .layer(cors)
        .layer(trace_layer())
}

fn trace_layer() -> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
        .on_failure(DefaultOnFailure::new().level(Level::ERROR))
}
