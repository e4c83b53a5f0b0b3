use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use domain_projects::{ProjectRepository, ProjectService};

use crate::error::{TaskError, TaskResult};
use crate::models::{
    CreateTask, DeleteTaskResponse, TaskFilter, TaskPage, TaskWithProject, UpdateTask,
};
use crate::repository::TaskRepository;

/// Service layer for Task business logic
///
/// Holds the project service alongside the task repository: every read
/// resolves the owning project eagerly, and task creation verifies the
/// project exists before anything is persisted.
#[derive(Clone)]
pub struct TaskService<R: TaskRepository, P: ProjectRepository> {
    repository: Arc<R>,
    projects: ProjectService<P>,
}

impl<R: TaskRepository, P: ProjectRepository> TaskService<R, P> {
    pub fn new(repository: R, projects: ProjectService<P>) -> Self {
        Self {
            repository: Arc::new(repository),
            projects,
        }
    }

    /// Create a new task under a project
    ///
    /// The owning project is resolved first; a missing project fails the
    /// call before any task is persisted.
    #[instrument(skip(self, input), fields(project_id, task_title = %input.title))]
    pub async fn create_task(
        &self,
        project_id: i64,
        input: CreateTask,
    ) -> TaskResult<TaskWithProject> {
        input
            .validate()
            .map_err(|e| TaskError::Validation(e.to_string()))?;

        let project = self.projects.get_project(project_id).await?;
        let task = self.repository.create(project_id, input).await?;

        Ok(TaskWithProject::new(task, project))
    }

    /// Get a task by ID with its owning project attached
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn get_task(&self, id: i64) -> TaskResult<TaskWithProject> {
        let task = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        let project = self.projects.get_project(task.project_id).await?;
        Ok(TaskWithProject::new(task, project))
    }

    /// List a project's tasks with filters
    ///
    /// Resolves the project first, so listing against a missing project
    /// is an error rather than an empty page.
    pub async fn list_tasks(&self, project_id: i64, filter: TaskFilter) -> TaskResult<TaskPage> {
        let project = self.projects.get_project(project_id).await?;

        let (tasks, total) = self.repository.list(project_id, filter).await?;

        Ok(TaskPage {
            tasks: tasks
                .into_iter()
                .map(|task| TaskWithProject::new(task, project.clone()))
                .collect(),
            total,
        })
    }

    /// Update a task
    #[instrument(skip(self, input), fields(task_id = id))]
    pub async fn update_task(&self, id: i64, input: UpdateTask) -> TaskResult<TaskWithProject> {
        input
            .validate()
            .map_err(|e| TaskError::Validation(e.to_string()))?;

        let task = self.repository.update(id, input).await?;
        let project = self.projects.get_project(task.project_id).await?;

        Ok(TaskWithProject::new(task, project))
    }

    /// Delete a task
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn delete_task(&self, id: i64) -> TaskResult<DeleteTaskResponse> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(TaskError::NotFound(id));
        }

        Ok(DeleteTaskResponse {
            message: format!("Task {} was successfully deleted", id),
        })
    }
}
