//! Employee record logic.
//!
//! Writes validate the referenced department through the directory and fail
//! hard when the reference is invalid or cannot be checked. Reads enrich each
//! record with department data but tolerate any directory failure, so
//! employee data stays available when the department service is not.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use models::employee;
use models::errors::ModelError;

use crate::directory::{DepartmentDirectory, DepartmentDto, DirectoryError};
use crate::errors::ServiceError;
use crate::validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: String,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    pub department_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: String,
    pub salary: Option<f64>,
    pub hire_date: NaiveDate,
    pub department_id: Uuid,
    /// Enrichment from the department service; absent whenever the lookup
    /// fails, including dangling references.
    pub department: Option<DepartmentDto>,
}

fn to_response(m: employee::Model, department: Option<DepartmentDto>) -> EmployeeResponse {
    EmployeeResponse {
        id: m.id,
        first_name: m.first_name,
        last_name: m.last_name,
        email: m.email,
        position: m.position,
        salary: m.salary,
        hire_date: m.hire_date,
        department_id: m.department_id,
        department,
    }
}

pub async fn create_employee(
    db: &DatabaseConnection,
    directory: &dyn DepartmentDirectory,
    input: EmployeeInput,
) -> Result<EmployeeResponse, ServiceError> {
    validate::employee_input(&input)?;
    info!(email = %input.email, "creating employee");

    if employee::exists_by_email(db, &input.email).await? {
        return Err(ServiceError::AlreadyExists(format!(
            "employee with email '{}'",
            input.email
        )));
    }

    // Hard failure before anything is persisted: a never-validated reference
    // must not reach the store.
    let department = validate_department_exists(directory, input.department_id).await?;

    let hire_date = input.hire_date.unwrap_or_else(|| Utc::now().date_naive());
    let created = employee::create(
        db,
        employee::NewEmployee {
            first_name: &input.first_name,
            last_name: &input.last_name,
            email: &input.email,
            position: &input.position,
            salary: input.salary,
            hire_date,
            department_id: input.department_id,
        },
    )
    .await?;

    info!(id = %created.id, "employee created");
    Ok(to_response(created, Some(department)))
}

pub async fn get_employee(
    db: &DatabaseConnection,
    directory: &dyn DepartmentDirectory,
    id: Uuid,
) -> Result<EmployeeResponse, ServiceError> {
    let found = find_required(db, id).await?;
    Ok(build_response(directory, found).await)
}

pub async fn list_employees(
    db: &DatabaseConnection,
    directory: &dyn DepartmentDirectory,
) -> Result<Vec<EmployeeResponse>, ServiceError> {
    let all = employee::Entity::find()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(build_responses(directory, all).await)
}

pub async fn update_employee(
    db: &DatabaseConnection,
    directory: &dyn DepartmentDirectory,
    id: Uuid,
    input: EmployeeInput,
) -> Result<EmployeeResponse, ServiceError> {
    validate::employee_input(&input)?;
    info!(id = %id, "updating employee");

    let existing = find_required(db, id).await?;

    if existing.email != input.email && employee::exists_by_email(db, &input.email).await? {
        return Err(ServiceError::AlreadyExists(format!(
            "employee with email '{}'",
            input.email
        )));
    }

    // An unchanged department reference was validated when it was written;
    // skip the remote call entirely.
    if existing.department_id != input.department_id {
        validate_department_exists(directory, input.department_id).await?;
    }

    let hire_date = input.hire_date.unwrap_or(existing.hire_date);
    let mut am: employee::ActiveModel = existing.into();
    am.first_name = Set(input.first_name.clone());
    am.last_name = Set(input.last_name.clone());
    am.email = Set(input.email.clone());
    am.position = Set(input.position.clone());
    am.salary = Set(input.salary);
    am.hire_date = Set(hire_date);
    am.department_id = Set(input.department_id);
    let updated = am
        .update(db)
        .await
        .map_err(|e| ModelError::from_write(&format!("employee with email '{}'", input.email), e))?;

    info!(id = %updated.id, "employee updated");
    Ok(build_response(directory, updated).await)
}

pub async fn delete_employee(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    info!(id = %id, "deleting employee");
    let existing = find_required(db, id).await?;
    employee::Entity::delete_by_id(existing.id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

/// List employees of one department.
///
/// Unlike the other reads this validates the department up front: an empty
/// result must mean "department exists but has no employees", not "no such
/// department".
pub async fn get_employees_by_department(
    db: &DatabaseConnection,
    directory: &dyn DepartmentDirectory,
    department_id: Uuid,
) -> Result<Vec<EmployeeResponse>, ServiceError> {
    let department = validate_department_exists(directory, department_id).await?;

    let found = employee::Entity::find()
        .filter(employee::Column::DepartmentId.eq(department_id))
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found
        .into_iter()
        .map(|m| to_response(m, Some(department.clone())))
        .collect())
}

pub async fn get_employee_by_email(
    db: &DatabaseConnection,
    directory: &dyn DepartmentDirectory,
    email: &str,
) -> Result<EmployeeResponse, ServiceError> {
    let found = employee::find_by_email(db, email)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("employee with email '{email}'")))?;
    Ok(build_response(directory, found).await)
}

/// Case-insensitive substring match on first or last name. Matching happens
/// in-process so results do not depend on the backend's LIKE collation.
pub async fn search_employees_by_name(
    db: &DatabaseConnection,
    directory: &dyn DepartmentDirectory,
    name: &str,
) -> Result<Vec<EmployeeResponse>, ServiceError> {
    let needle = name.to_lowercase();
    let all = employee::Entity::find()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let matched = all
        .into_iter()
        .filter(|m| {
            m.first_name.to_lowercase().contains(&needle)
                || m.last_name.to_lowercase().contains(&needle)
        })
        .collect();
    Ok(build_responses(directory, matched).await)
}

async fn find_required(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<employee::Model, ServiceError> {
    employee::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::NotFound(format!("employee with id {id}")))
}

/// Three-way write-path check: the department data on success, a hard
/// `DepartmentNotFound` / `DepartmentUnavailable` otherwise.
async fn validate_department_exists(
    directory: &dyn DepartmentDirectory,
    department_id: Uuid,
) -> Result<DepartmentDto, ServiceError> {
    match directory.get_department(department_id).await {
        Ok(department) => Ok(department),
        Err(DirectoryError::NotFound) => {
            error!(department_id = %department_id, "department not found");
            Err(ServiceError::DepartmentNotFound(department_id))
        }
        Err(DirectoryError::Unavailable(reason)) => {
            error!(department_id = %department_id, error = %reason, "error communicating with department service");
            Err(ServiceError::DepartmentUnavailable(reason))
        }
    }
}

/// Read-path enrichment: any directory failure is logged and yields an
/// absent department, never an error.
async fn build_response(
    directory: &dyn DepartmentDirectory,
    model: employee::Model,
) -> EmployeeResponse {
    let department = match directory.get_department(model.department_id).await {
        Ok(department) => Some(department),
        Err(err) => {
            warn!(employee_id = %model.id, error = %err, "could not fetch department information");
            None
        }
    };
    to_response(model, department)
}

async fn build_responses(
    directory: &dyn DepartmentDirectory,
    models: Vec<employee::Model>,
) -> Vec<EmployeeResponse> {
    let mut out = Vec::with_capacity(models.len());
    for model in models {
        out.push(build_response(directory, model).await);
    }
    out
}
