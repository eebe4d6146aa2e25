use crate::health::{HealthServiceError, HealthState, create_health_router};
use crate::todo::{TodoServiceError, TodoState, create_todo_router};
use axum::{
    Json, Router,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON response for API errors
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: &str, message: String) -> Self {
        Self {
            error: error.to_string(),
            message,
        }
    }
}

/// Errors surfaced by the JSON API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A create candidate failed validation.
    #[error("{0}")]
    Validation(String),
    /// The request could not be decoded.
    #[error("{0}")]
    BadRequest(String),
    /// The store failed. The source is logged, never sent to the client.
    #[error("Storage failure: {0}")]
    Storage(#[source] sea_orm::DbErr),
}

impl From<TodoServiceError> for ApiError {
    fn from(err: TodoServiceError) -> Self {
        match err {
            TodoServiceError::Validation(message) => ApiError::Validation(message),
            TodoServiceError::Storage(db_err) => ApiError::Storage(db_err),
        }
    }
}

impl From<HealthServiceError> for ApiError {
    fn from(err: HealthServiceError) -> Self {
        match err {
            HealthServiceError::Storage(db_err) => ApiError::Storage(db_err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, body) = match self {
            ApiError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("VALIDATION_ERROR", message),
            ),
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("BAD_REQUEST", message),
            ),
            ApiError::Storage(db_err) => {
                tracing::error!(error = %db_err, "Storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "INTERNAL_SERVER_ERROR",
                        "An unexpected error occurred while processing your request. Please try again later."
                            .to_string(),
                    ),
                )
            }
        };

        (status_code, Json(body)).into_response()
    }
}

/// Creates the JSON API routes, nested under `/api`.
pub fn create_api_router(todo_state: TodoState, health_state: HealthState) -> Router {
    let api_routes = create_todo_router(todo_state).merge(create_health_router(health_state));
    Router::new().nest("/api", api_routes)
}
