use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, ColumnTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use models::department;
use models::errors::ModelError;

use crate::errors::ServiceError;
use crate::validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentInput {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<department::Model> for DepartmentResponse {
    fn from(m: department::Model) -> Self {
        Self { id: m.id, name: m.name }
    }
}

pub async fn create_department(
    db: &DatabaseConnection,
    input: DepartmentInput,
) -> Result<DepartmentResponse, ServiceError> {
    validate::department_input(&input)?;
    info!(name = %input.name, "creating department");

    if department::exists_by_name(db, &input.name).await? {
        return Err(ServiceError::AlreadyExists(format!(
            "department with name '{}'",
            input.name
        )));
    }

    let created = department::create(db, &input.name).await?;
    info!(id = %created.id, "department created");
    Ok(created.into())
}

pub async fn get_department(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<DepartmentResponse, ServiceError> {
    department::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .map(DepartmentResponse::from)
        .ok_or_else(|| ServiceError::NotFound(format!("department with id {id}")))
}

pub async fn list_departments(
    db: &DatabaseConnection,
) -> Result<Vec<DepartmentResponse>, ServiceError> {
    let all = department::Entity::find()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(all.into_iter().map(DepartmentResponse::from).collect())
}

pub async fn update_department(
    db: &DatabaseConnection,
    id: Uuid,
    input: DepartmentInput,
) -> Result<DepartmentResponse, ServiceError> {
    validate::department_input(&input)?;
    info!(id = %id, "updating department");

    let existing = department::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::NotFound(format!("department with id {id}")))?;

    // Renaming to the current name is a no-op collision check
    if existing.name != input.name && department::exists_by_name(db, &input.name).await? {
        return Err(ServiceError::AlreadyExists(format!(
            "department with name '{}'",
            input.name
        )));
    }

    let mut am: department::ActiveModel = existing.into();
    am.name = Set(input.name.clone());
    let updated = am
        .update(db)
        .await
        .map_err(|e| ModelError::from_write(&format!("department with name '{}'", input.name), e))?;
    Ok(updated.into())
}

pub async fn delete_department(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    info!(id = %id, "deleting department");

    let existing = department::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::NotFound(format!("department with id {id}")))?;

    // Deletion is never blocked by employees referencing this department; the
    // department service has no visibility into the employee store.
    department::Entity::delete_by_id(existing.id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

pub async fn get_department_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<DepartmentResponse, ServiceError> {
    department::Entity::find()
        .filter(department::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .map(DepartmentResponse::from)
        .ok_or_else(|| ServiceError::NotFound(format!("department with name '{name}'")))
}
