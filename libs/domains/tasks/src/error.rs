use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_projects::ProjectError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task {0} not found!")]
    NotFound(i64),

    #[error("Project {0} not found!")]
    ProjectNotFound(i64),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

/// Failures while resolving the owning project surface as task errors
impl From<ProjectError> for TaskError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NotFound(id) => TaskError::ProjectNotFound(id),
            ProjectError::Validation(msg) => TaskError::Validation(msg),
            ProjectError::Internal(msg) => TaskError::Internal(msg),
        }
    }
}

/// Convert TaskError to AppError for standardized error responses
impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(id) => AppError::NotFound(format!("Task {} not found!", id)),
            TaskError::ProjectNotFound(id) => {
                AppError::NotFound(format!("Project {} not found!", id))
            }
            TaskError::Validation(msg) => AppError::BadRequest(msg),
            TaskError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        // Convert to AppError for standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
