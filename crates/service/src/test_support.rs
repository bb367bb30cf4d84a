#![cfg(test)]
use async_trait::async_trait;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use uuid::Uuid;

use crate::directory::{DepartmentDirectory, DepartmentDto, DirectoryError};

/// Fresh in-memory sqlite database with both schemas applied. A single
/// connection is required or each pooled connection would see its own
/// empty database.
pub async fn memory_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.expect("connect sqlite");
    migration::DepartmentMigrator::up(&db, None)
        .await
        .expect("department migrations");
    migration::EmployeeMigrator::up(&db, None)
        .await
        .expect("employee migrations");
    db
}

/// Scriptable in-process directory covering the three remote outcomes.
pub enum FakeDirectory {
    Found(String),
    NotFound,
    Unavailable,
}

impl FakeDirectory {
    pub fn found(name: &str) -> Self {
        Self::Found(name.to_string())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn unavailable() -> Self {
        Self::Unavailable
    }
}

#[async_trait]
impl DepartmentDirectory for FakeDirectory {
    async fn get_department(&self, id: Uuid) -> Result<DepartmentDto, DirectoryError> {
        match self {
            Self::Found(name) => Ok(DepartmentDto { id, name: name.clone() }),
            Self::NotFound => Err(DirectoryError::NotFound),
            Self::Unavailable => Err(DirectoryError::Unavailable("connection refused".into())),
        }
    }
}
