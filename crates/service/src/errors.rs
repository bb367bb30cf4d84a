use std::collections::BTreeMap;

use thiserror::Error;
use uuid::Uuid;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation errors occurred")]
    Validation(BTreeMap<String, String>),
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0} already exists")]
    AlreadyExists(String),
    #[error("department not found with id: {0}")]
    DepartmentNotFound(Uuid),
    #[error("unable to validate department: {0}")]
    DepartmentUnavailable(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Conflict(what) => Self::AlreadyExists(what),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}
