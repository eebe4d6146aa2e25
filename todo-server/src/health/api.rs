use crate::health::{HealthResponse, HealthService};
use crate::web::api::{ApiError, ErrorResponse};
use axum::{Router, extract::State, response::Json, routing::get};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct HealthState {
    pub service: Arc<HealthService>,
}

impl HealthState {
    pub fn new(service: HealthService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// JSON body of a health check.
#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthJson {
    /// Human-readable status
    pub message: String,
    /// Build identifier
    pub version: String,
}

impl From<HealthResponse> for HealthJson {
    fn from(response: HealthResponse) -> Self {
        Self {
            message: response.message().to_string(),
            version: response.version().to_string(),
        }
    }
}

/// Handler for GET /api/health - Records a health check and reports status.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthJson),
        (status = 500, description = "The health record could not be written", body = ErrorResponse)
    ),
    tag = "Health"
)]
pub async fn health_check_handler(
    State(state): State<HealthState>,
) -> Result<Json<HealthJson>, ApiError> {
    let response = state.service.check_health().await?;
    Ok(Json(HealthJson::from(response)))
}

/// Creates the health router. Paths are relative to the `/api` prefix.
pub fn create_health_router(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health_check_handler))
        .with_state(state)
}
