use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use service::department_service::{self, DepartmentInput, DepartmentResponse};

use crate::errors::ApiError;
use crate::routes::DepartmentState;

pub async fn create(
    State(state): State<DepartmentState>,
    Json(input): Json<DepartmentInput>,
) -> Result<(StatusCode, Json<DepartmentResponse>), ApiError> {
    let created = department_service::create_department(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_by_id(
    State(state): State<DepartmentState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    let found = department_service::get_department(&state.db, id).await?;
    Ok(Json(found))
}

pub async fn list(
    State(state): State<DepartmentState>,
) -> Result<Json<Vec<DepartmentResponse>>, ApiError> {
    let all = department_service::list_departments(&state.db).await?;
    Ok(Json(all))
}

pub async fn update(
    State(state): State<DepartmentState>,
    Path(id): Path<Uuid>,
    Json(input): Json<DepartmentInput>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    let updated = department_service::update_department(&state.db, id, input).await?;
    Ok(Json(updated))
}

pub async fn remove(
    State(state): State<DepartmentState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    department_service::delete_department(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_by_name(
    State(state): State<DepartmentState>,
    Path(name): Path<String>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    let found = department_service::get_department_by_name(&state.db, &name).await?;
    Ok(Json(found))
}
