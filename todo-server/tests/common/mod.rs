#![allow(dead_code)]

use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use todo_server::health::{HealthService, HealthState, SeaOrmHealthRepository};
use todo_server::todo::{SeaOrmTodoRepository, TodoService, TodoState};

pub struct TestContext {
    pub db: Arc<DatabaseConnection>,
}

impl TestContext {
    pub fn todo_service(&self) -> TodoService {
        TodoService::new(Arc::new(SeaOrmTodoRepository::new(self.db.clone())))
    }

    pub fn todo_state(&self) -> TodoState {
        TodoState::new(self.todo_service())
    }

    pub fn health_state(&self) -> HealthState {
        HealthState::new(HealthService::new(Arc::new(SeaOrmHealthRepository::new(
            self.db.clone(),
        ))))
    }
}

/// Every call gets its own migrated in-memory database.
pub async fn setup() -> anyhow::Result<TestContext> {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().try_init();
    let db = todo_server::db::connect("sqlite::memory:").await?;
    Ok(TestContext { db: Arc::new(db) })
}

/// HTTP response snapshot for testing JSON endpoints.
#[derive(Debug, Serialize)]
pub struct HttpResponseSnapshot {
    test_context: String,
    status: u16,
    headers: BTreeMap<String, String>,
    body: serde_json::Value,
}

impl HttpResponseSnapshot {
    pub async fn from_response(response: Response, test_context: &str) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let body = read_body(response).await;
        Self::new(&body, status, &headers, test_context)
    }

    pub fn new(body: &[u8], status: StatusCode, headers: &HeaderMap, test_context: &str) -> Self {
        let body = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(body).expect("response body is not JSON")
        };
        Self {
            test_context: test_context.to_string(),
            status: status.as_u16(),
            headers: filter_variable_headers(headers),
            body,
        }
    }
}

pub async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("response body is not the expected JSON")
}

/// Filter out variable headers from response headers for snapshot testing.
fn filter_variable_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let variable_headers = ["date", "server", "x-request-id", "content-length"];

    headers
        .iter()
        .filter_map(|(name, value)| {
            let name_str = name.as_str().to_lowercase();
            if variable_headers.contains(&name_str.as_str()) {
                None
            } else {
                value.to_str().ok().map(|v| (name_str, v.to_string()))
            }
        })
        .collect()
}
