use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;

use service::errors::ServiceError;

/// Error body shared by both services:
/// `{timestamp, status, error, message, validationErrors?}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<BTreeMap<String, String>>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: &str, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: error.to_string(),
            message: message.into(),
            validation_errors: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(errors) => {
                let mut body = Self::new(
                    StatusCode::BAD_REQUEST,
                    "Validation Failed",
                    "Validation errors occurred",
                );
                body.validation_errors = Some(errors);
                body
            }
            ServiceError::NotFound(what) => {
                Self::new(StatusCode::NOT_FOUND, "Not Found", format!("{what} not found"))
            }
            ServiceError::AlreadyExists(what) => {
                Self::new(StatusCode::CONFLICT, "Conflict", format!("{what} already exists"))
            }
            ServiceError::DepartmentNotFound(id) => Self::new(
                StatusCode::NOT_FOUND,
                "Department Not Found",
                format!("Department not found with id: {id}"),
            ),
            ServiceError::DepartmentUnavailable(_) => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "Department Service Unavailable",
                "Unable to validate department. Please try again later.",
            ),
            ServiceError::Db(msg) => {
                error!(error = %msg, "internal error");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "An unexpected error occurred",
                )
            }
        }
    }
}
