use crate::entities::*;
use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;

pub mod api;

pub use api::{TodoState, create_todo_router};

#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub struct TodoItem {
    id: u32,
    title: String,
    completed: bool,
}

impl TodoItem {
    pub fn new(id: u32, title: String, completed: bool) -> Self {
        Self {
            id,
            title,
            completed,
        }
    }

    /// Returns the server-assigned ID of the todo.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn completed(&self) -> bool {
        self.completed
    }
}

impl From<todo::Model> for TodoItem {
    fn from(model: todo::Model) -> Self {
        TodoItem::new(model.id as u32, model.title, model.completed)
    }
}

/// A create request as supplied by the caller. Nothing in it is trusted until
/// it has been validated by [`TodoService::create`].
#[derive(Debug, Default, Clone)]
pub struct TodoCandidate {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl TodoCandidate {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            completed: None,
        }
    }
}

/// A validated todo that has not been assigned an ID yet.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct NewTodo {
    pub title: String,
    pub completed: bool,
}

/// Error type for TodoService operations.
#[derive(Debug, thiserror::Error)]
pub enum TodoServiceError {
    /// The candidate was rejected before anything was written.
    #[error("Validation failed: {0}")]
    Validation(String),
    /// Represents a failure of the underlying store.
    #[error("Database error: {0}")]
    Storage(#[from] DbErr),
}

/// Durable storage for todos. The store assigns identities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Persists a new todo and returns it with its assigned ID.
    async fn save(&self, todo: NewTodo) -> Result<TodoItem, DbErr>;

    /// Returns every stored todo.
    async fn find_all(&self) -> Result<Vec<TodoItem>, DbErr>;

    /// Removes the todo with the given ID and returns the number of rows removed.
    async fn delete_by_id(&self, id: u32) -> Result<u64, DbErr>;
}

/// [`TodoRepository`] backed by the `todo` table.
pub struct SeaOrmTodoRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmTodoRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoRepository for SeaOrmTodoRepository {
    #[tracing::instrument(skip(self))]
    async fn save(&self, todo: NewTodo) -> Result<TodoItem, DbErr> {
        let active_model = todo::ActiveModel {
            title: ActiveValue::Set(todo.title),
            completed: ActiveValue::Set(todo.completed),
            ..Default::default()
        };
        let created_model = active_model.insert(self.db.as_ref()).await?;
        Ok(TodoItem::from(created_model))
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<TodoItem>, DbErr> {
        let todos = todo::Entity::find()
            .order_by_asc(todo::Column::Id)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(TodoItem::from)
            .collect();
        Ok(todos)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_by_id(&self, id: u32) -> Result<u64, DbErr> {
        // IDs beyond the key range can never have been issued.
        let Ok(key) = i32::try_from(id) else {
            return Ok(0);
        };
        let result = todo::Entity::delete_by_id(key)
            .exec(self.db.as_ref())
            .await?;
        Ok(result.rows_affected)
    }
}

pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    /// Validates the candidate and persists it.
    ///
    /// # Arguments
    ///
    /// * `candidate` - The caller-supplied todo. Its title must be present and not blank.
    ///
    /// # Returns
    ///
    /// A `Result` containing the stored `TodoItem` with its assigned ID, or
    /// `TodoServiceError::Validation` when the title is missing or blank.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, candidate: TodoCandidate) -> Result<TodoItem, TodoServiceError> {
        let title = match candidate.title {
            Some(title) if !title.trim().is_empty() => title,
            Some(_) => {
                return Err(TodoServiceError::Validation(
                    "title must not be blank".to_string(),
                ));
            }
            None => {
                return Err(TodoServiceError::Validation(
                    "title is required".to_string(),
                ));
            }
        };

        let new_todo = NewTodo {
            title,
            completed: candidate.completed.unwrap_or(false),
        };
        let created = self.repository.save(new_todo).await?;
        tracing::info!(id = created.id(), "Created todo");
        Ok(created)
    }

    /// Retrieves all todos in store order.
    #[tracing::instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<TodoItem>, TodoServiceError> {
        Ok(self.repository.find_all().await?)
    }

    /// Deletes a todo by its ID. Deleting an ID that does not exist is not an error.
    #[tracing::instrument(skip(self))]
    pub async fn delete_by_id(&self, id: u32) -> Result<(), TodoServiceError> {
        let removed = self.repository.delete_by_id(id).await?;
        if removed == 0 {
            tracing::debug!(id, "No todo to delete");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn service_with(repository: MockTodoRepository) -> TodoService {
        TodoService::new(Arc::new(repository))
    }

    #[tokio::test]
    async fn create_defaults_completed_to_false() {
        let mut repository = MockTodoRepository::new();
        repository
            .expect_save()
            .with(eq(NewTodo {
                title: "Buy milk".to_string(),
                completed: false,
            }))
            .times(1)
            .returning(|todo| Ok(TodoItem::new(1, todo.title, todo.completed)));

        let created = service_with(repository)
            .create(TodoCandidate::with_title("Buy milk"))
            .await
            .unwrap();

        assert_eq!(created, TodoItem::new(1, "Buy milk".to_string(), false));
    }

    #[tokio::test]
    async fn create_keeps_supplied_completed_flag() {
        let mut repository = MockTodoRepository::new();
        repository
            .expect_save()
            .times(1)
            .returning(|todo| Ok(TodoItem::new(7, todo.title, todo.completed)));

        let candidate = TodoCandidate {
            title: Some("Walk the dog".to_string()),
            completed: Some(true),
        };
        let created = service_with(repository).create(candidate).await.unwrap();

        assert!(created.completed());
        assert_eq!(created.title(), "Walk the dog");
    }

    #[tokio::test]
    async fn create_rejects_blank_title_without_touching_the_store() {
        let mut repository = MockTodoRepository::new();
        repository.expect_save().never();
        let service = service_with(repository);

        for title in ["", "   ", "\t\n"] {
            let result = service.create(TodoCandidate::with_title(title)).await;
            assert!(
                matches!(result, Err(TodoServiceError::Validation(_))),
                "title {title:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn create_rejects_missing_title_without_touching_the_store() {
        let mut repository = MockTodoRepository::new();
        repository.expect_save().never();

        let result = service_with(repository)
            .create(TodoCandidate::default())
            .await;

        match result {
            Err(TodoServiceError::Validation(message)) => assert_eq!(message, "title is required"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_propagates_storage_fault() {
        let mut repository = MockTodoRepository::new();
        repository
            .expect_save()
            .returning(|_| Err(DbErr::Custom("disk full".to_string())));

        let result = service_with(repository)
            .create(TodoCandidate::with_title("Buy milk"))
            .await;

        assert!(matches!(result, Err(TodoServiceError::Storage(_))));
    }

    #[tokio::test]
    async fn delete_of_missing_id_is_a_no_op() {
        let mut repository = MockTodoRepository::new();
        repository
            .expect_delete_by_id()
            .with(eq(42))
            .times(1)
            .returning(|_| Ok(0));

        let result = service_with(repository).delete_by_id(42).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn delete_by_id_propagates_storage_fault() {
        let mut repository = MockTodoRepository::new();
        repository
            .expect_delete_by_id()
            .with(eq(3))
            .times(1)
            .returning(|_| Err(DbErr::Custom("database is locked".to_string())));

        let result = service_with(repository).delete_by_id(3).await;

        assert!(matches!(result, Err(TodoServiceError::Storage(_))));
    }

    #[tokio::test]
    async fn list_all_propagates_storage_fault() {
        let mut repository = MockTodoRepository::new();
        repository
            .expect_find_all()
            .returning(|| Err(DbErr::Custom("connection reset".to_string())));

        let result = service_with(repository).list_all().await;

        assert!(matches!(result, Err(TodoServiceError::Storage(_))));
    }
}
