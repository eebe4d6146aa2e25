//! Health checks that leave an audit trail.
//!
//! Every check appends a `health` row stamped with the time it was written.
//! The response returned to the caller is built from constants and never
//! reads that row back.

use crate::entities::*;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::*;
use std::sync::Arc;

pub mod api;

pub use api::{HealthState, create_health_router};

/// Status written on every check.
pub const STATUS_UP: &str = "UP";
/// Message returned to the caller.
pub const HEALTH_MESSAGE: &str = "System is UP";
/// Build identifier returned to the caller.
pub const HEALTH_VERSION: &str = "1.0.0";

#[derive(Debug, PartialEq, Clone, Eq)]
pub struct HealthRecord {
    id: u32,
    status: String,
    timestamp: DateTime<Utc>,
}

impl HealthRecord {
    pub fn new(id: u32, status: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            status,
            timestamp,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl From<health::Model> for HealthRecord {
    fn from(model: health::Model) -> Self {
        HealthRecord::new(model.id as u32, model.status, model.timestamp)
    }
}

/// A status entry that has not been written yet.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct NewHealthRecord {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, PartialEq, Clone, Eq)]
pub struct HealthResponse {
    message: String,
    version: String,
}

impl HealthResponse {
    pub fn new(message: String, version: String) -> Self {
        Self { message, version }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HealthServiceError {
    #[error("Database error: {0}")]
    Storage(#[from] DbErr),
}

/// Append-only storage for health records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthRepository: Send + Sync {
    async fn save(&self, record: NewHealthRecord) -> Result<HealthRecord, DbErr>;
}

pub struct SeaOrmHealthRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmHealthRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HealthRepository for SeaOrmHealthRepository {
    #[tracing::instrument(skip(self))]
    async fn save(&self, record: NewHealthRecord) -> Result<HealthRecord, DbErr> {
        let active_model = health::ActiveModel {
            status: ActiveValue::Set(record.status),
            timestamp: ActiveValue::Set(record.timestamp),
            ..Default::default()
        };
        let created_model = active_model.insert(self.db.as_ref()).await?;
        Ok(HealthRecord::from(created_model))
    }
}

pub struct HealthService {
    repository: Arc<dyn HealthRepository>,
}

impl HealthService {
    pub fn new(repository: Arc<dyn HealthRepository>) -> Self {
        Self { repository }
    }

    /// Records an `UP` entry and reports the service as healthy.
    ///
    /// A failed write aborts the check; no response is built in that case.
    #[tracing::instrument(skip(self))]
    pub async fn check_health(&self) -> Result<HealthResponse, HealthServiceError> {
        let record = NewHealthRecord {
            status: STATUS_UP.to_string(),
            timestamp: Utc::now(),
        };
        let written = self.repository.save(record).await?;
        tracing::debug!(id = written.id(), "Recorded health check");

        Ok(HealthResponse::new(
            HEALTH_MESSAGE.to_string(),
            HEALTH_VERSION.to_string(),
        ))
    }
}
