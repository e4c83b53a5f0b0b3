use std::sync::Arc;
use validator::Validate;

use crate::error::{ProjectError, ProjectResult};
use crate::models::{
    CreateProject, DeleteProjectResponse, Project, ProjectFilter, ProjectPage, UpdateProject,
};
use crate::repository::ProjectRepository;

/// Service layer for Project business logic
#[derive(Clone)]
pub struct ProjectService<R: ProjectRepository> {
    repository: Arc<R>,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub fn from_arc(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a new project with validation
    pub async fn create_project(&self, input: CreateProject) -> ProjectResult<Project> {
        input
            .validate()
            .map_err(|e| ProjectError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a project by ID
    pub async fn get_project(&self, id: i64) -> ProjectResult<Project> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProjectError::NotFound(id))
    }

    /// List projects with filters
    pub async fn list_projects(&self, filter: ProjectFilter) -> ProjectResult<ProjectPage> {
        self.repository.list(filter).await
    }

    /// Update a project
    pub async fn update_project(&self, id: i64, input: UpdateProject) -> ProjectResult<Project> {
        input
            .validate()
            .map_err(|e| ProjectError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete a project, cascading to its tasks
    pub async fn delete_project(&self, id: i64) -> ProjectResult<DeleteProjectResponse> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(ProjectError::NotFound(id));
        }

        Ok(DeleteProjectResponse {
            message: format!("Project {} has been successfully deleted", id),
        })
    }
}
