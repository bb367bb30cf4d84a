use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use service::employee_service::{self, EmployeeInput, EmployeeResponse};

use crate::errors::ApiError;
use crate::routes::EmployeeState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: String,
}

pub async fn create(
    State(state): State<EmployeeState>,
    Json(input): Json<EmployeeInput>,
) -> Result<(StatusCode, Json<EmployeeResponse>), ApiError> {
    let created =
        employee_service::create_employee(&state.db, state.directory.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_by_id(
    State(state): State<EmployeeState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let found = employee_service::get_employee(&state.db, state.directory.as_ref(), id).await?;
    Ok(Json(found))
}

pub async fn list(
    State(state): State<EmployeeState>,
) -> Result<Json<Vec<EmployeeResponse>>, ApiError> {
    let all = employee_service::list_employees(&state.db, state.directory.as_ref()).await?;
    Ok(Json(all))
}

pub async fn update(
    State(state): State<EmployeeState>,
    Path(id): Path<Uuid>,
    Json(input): Json<EmployeeInput>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let updated =
        employee_service::update_employee(&state.db, state.directory.as_ref(), id, input).await?;
    Ok(Json(updated))
}

pub async fn remove(
    State(state): State<EmployeeState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    employee_service::delete_employee(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn by_department(
    State(state): State<EmployeeState>,
    Path(department_id): Path<Uuid>,
) -> Result<Json<Vec<EmployeeResponse>>, ApiError> {
    let members = employee_service::get_employees_by_department(
        &state.db,
        state.directory.as_ref(),
        department_id,
    )
    .await?;
    Ok(Json(members))
}

pub async fn search(
    State(state): State<EmployeeState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<EmployeeResponse>>, ApiError> {
    let hits =
        employee_service::search_employees_by_name(&state.db, state.directory.as_ref(), &query.name)
            .await?;
    Ok(Json(hits))
}

pub async fn by_email(
    State(state): State<EmployeeState>,
    Path(email): Path<String>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let found =
        employee_service::get_employee_by_email(&state.db, state.directory.as_ref(), &email)
            .await?;
    Ok(Json(found))
}
