use axum::Router;
use axum::response::Json;
use axum::routing::get;
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::health::{HealthService, HealthState, SeaOrmHealthRepository};
use crate::todo::{SeaOrmTodoRepository, TodoService, TodoState};

pub mod api;
pub mod docs;

/// Body of the index page.
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    status: &'static str,
    message: &'static str,
    docs: &'static str,
}

/// Wires the repositories, services and routers around one database handle.
pub fn create_app(db: Arc<sea_orm::DatabaseConnection>) -> Router {
    let todo_service = TodoService::new(Arc::new(SeaOrmTodoRepository::new(db.clone())));
    let health_service = HealthService::new(Arc::new(SeaOrmHealthRepository::new(db)));

    let api_router = api::create_api_router(
        TodoState::new(todo_service),
        HealthState::new(health_service),
    );

    Router::new()
        .route("/", get(index_handler))
        .merge(SwaggerUi::new("/swagger").url("/api-docs", docs::ApiDoc::openapi()))
        .merge(api_router)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Config) -> anyhow::Result<()> {
    let server_address = format!("0.0.0.0:{}", &config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    let db = crate::db::connect(&config.db_url).await?;
    let app = create_app(Arc::new(db));

    axum::serve(listener, app).await?;
    Ok(())
}

#[tracing::instrument]
pub async fn index_handler() -> Json<IndexResponse> {
    Json(IndexResponse {
        status: "todo-server",
        message: "Ready for development!",
        docs: "/swagger",
    })
}
