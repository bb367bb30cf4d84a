//! Remote department lookup.
//!
//! The rest of the employee service only ever sees the three outcomes of
//! [`DepartmentDirectory::get_department`]: the department data, an
//! affirmative "no such department", or "cannot currently tell". Transport
//! mechanics stay behind this seam.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Department representation as served by the department service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentDto {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// The remote service affirmatively reported no such department (404).
    #[error("department not found")]
    NotFound,
    /// Anything else: connect failure, timeout, unexpected status, bad body.
    #[error("department service unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait DepartmentDirectory: Send + Sync {
    async fn get_department(&self, id: Uuid) -> Result<DepartmentDto, DirectoryError>;
}

/// reqwest-backed directory. Every call is bounded by the configured timeout;
/// expiry classifies as `Unavailable`, never an indefinite hang. No retries.
pub struct HttpDepartmentDirectory {
    http: reqwest::Client,
    base_url: String,
}

impl HttpDepartmentDirectory {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl DepartmentDirectory for HttpDepartmentDirectory {
    async fn get_department(&self, id: Uuid) -> Result<DepartmentDto, DirectoryError> {
        let url = format!("{}/departements/{}", self.base_url, id);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| DirectoryError::Unavailable(e.to_string()))?;
        match resp.status() {
            reqwest::StatusCode::OK => resp
                .json::<DepartmentDto>()
                .await
                .map_err(|e| DirectoryError::Unavailable(format!("invalid response body: {e}"))),
            reqwest::StatusCode::NOT_FOUND => Err(DirectoryError::NotFound),
            status => Err(DirectoryError::Unavailable(format!(
                "unexpected status {status}"
            ))),
        }
    }
}
