use crate::todo::{TodoCandidate, TodoItem, TodoService};
use crate::web::api::{ApiError, ErrorResponse};
use axum::{
    Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::Json,
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct TodoState {
    pub service: Arc<TodoService>,
}

impl TodoState {
    pub fn new(service: TodoService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// JSON representation of a todo for API responses.
#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TodoJson {
    /// Server-assigned identifier
    pub id: u32,
    /// What needs doing
    pub title: String,
    /// Whether the todo is done
    pub completed: bool,
}

impl From<TodoItem> for TodoJson {
    fn from(todo: TodoItem) -> Self {
        Self {
            id: todo.id(),
            title: todo.title().to_string(),
            completed: todo.completed(),
        }
    }
}

/// Request body for creating a todo. Any `id` sent by the client is ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTodoRequest {
    /// Required, must not be blank
    #[serde(default)]
    title: Option<String>,
    /// Defaults to false
    #[serde(default)]
    completed: Option<bool>,
}

impl From<CreateTodoRequest> for TodoCandidate {
    fn from(request: CreateTodoRequest) -> Self {
        Self {
            title: request.title,
            completed: request.completed,
        }
    }
}

/// Handler for GET /api/todos - Returns every todo.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/todos",
    responses(
        (status = 200, description = "Every stored todo", body = [TodoJson]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn list_todos_handler(
    State(state): State<TodoState>,
) -> Result<Json<Vec<TodoJson>>, ApiError> {
    let todos = state.service.list_all().await?;
    Ok(Json(todos.into_iter().map(TodoJson::from).collect()))
}

/// Handler for POST /api/todos - Creates a todo.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    post,
    path = "/api/todos",
    request_body = CreateTodoRequest,
    responses(
        (status = 201, description = "Todo created", body = TodoJson),
        (status = 400, description = "Missing or blank title, or malformed body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn create_todo_handler(
    State(state): State<TodoState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoJson>), ApiError> {
    let Json(request) = payload?;
    let created = state.service.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(TodoJson::from(created))))
}

/// Handler for DELETE /api/todos/{id} - Deletes a todo if it exists.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/api/todos/{id}",
    params(
        ("id" = u32, Path, description = "ID of the todo to delete")
    ),
    responses(
        (status = 204, description = "Todo deleted, or there was nothing to delete"),
        (status = 400, description = "ID is not a number", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn delete_todo_handler(
    State(state): State<TodoState>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.service.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Creates the todo router. Paths are relative to the `/api` prefix.
pub fn create_todo_router(state: TodoState) -> Router {
    Router::new()
        .route("/todos", get(list_todos_handler).post(create_todo_handler))
        .route("/todos/{id}", delete(delete_todo_handler))
        .with_state(state)
}
