use async_trait::async_trait;

use crate::error::TaskResult;
use crate::models::{CreateTask, Task, TaskFilter, UpdateTask};

/// Repository trait for Task persistence
///
/// This trait defines the data access interface for tasks.
/// Implementations can use different storage backends (PostgreSQL, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Create a new task under the given project
    async fn create(&self, project_id: i64, input: CreateTask) -> TaskResult<Task>;

    /// Get a task by ID
    async fn get_by_id(&self, id: i64) -> TaskResult<Option<Task>>;

    /// List tasks of a project with optional filters, returning the page
    /// and the total count of matching tasks
    async fn list(&self, project_id: i64, filter: TaskFilter) -> TaskResult<(Vec<Task>, u64)>;

    /// Update an existing task
    async fn update(&self, id: i64, input: UpdateTask) -> TaskResult<Task>;

    /// Delete a task by ID, returning whether a row was removed
    async fn delete(&self, id: i64) -> TaskResult<bool>;
}
