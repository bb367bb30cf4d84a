use chrono::{NaiveDate, Utc};
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// Employee record. `department_id` is a cross-store reference to the
/// department service; there is deliberately no foreign key backing it, the
/// reference is validated at write time only.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: String,
    pub salary: Option<f64>,
    pub hire_date: Date,
    pub department_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("no relations defined here")
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub struct NewEmployee<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub position: &'a str,
    pub salary: Option<f64>,
    pub hire_date: NaiveDate,
    pub department_id: Uuid,
}

pub async fn create(db: &DatabaseConnection, new: NewEmployee<'_>) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        first_name: Set(new.first_name.to_string()),
        last_name: Set(new.last_name.to_string()),
        email: Set(new.email.to_string()),
        position: Set(new.position.to_string()),
        salary: Set(new.salary),
        hire_date: Set(new.hire_date),
        department_id: Set(new.department_id),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db)
        .await
        .map_err(|e| ModelError::from_write(&format!("employee with email '{}'", new.email), e))
}

pub async fn find_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn exists_by_email(db: &DatabaseConnection, email: &str) -> Result<bool, ModelError> {
    Ok(find_by_email(db, email).await?.is_some())
}
