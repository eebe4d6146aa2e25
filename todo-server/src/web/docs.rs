use utoipa::OpenApi;

use crate::health::api::HealthJson;
use crate::todo::api::{CreateTodoRequest, TodoJson};
use crate::web::api::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    info(title = "todo-server", version = "1.0.0"),
    paths(
        crate::todo::api::list_todos_handler,
        crate::todo::api::create_todo_handler,
        crate::todo::api::delete_todo_handler,
        crate::health::api::health_check_handler,
    ),
    components(schemas(TodoJson, CreateTodoRequest, HealthJson, ErrorResponse)),
    tags(
        (name = "Todos", description = "Create, list and delete todos"),
        (name = "Health", description = "Health checks")
    )
)]
/// OpenAPI document served at `/api-docs` and rendered by Swagger UI at `/swagger`.
pub struct ApiDoc;
