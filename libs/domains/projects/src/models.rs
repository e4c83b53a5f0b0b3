use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Project entity - a container that owns a collection of tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Project {
    /// Unique identifier
    pub id: i64,
    /// Project name
    pub name: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a new project
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating an existing project
///
/// `description` is doubly optional: a missing field leaves the current
/// value untouched, while `Some(None)` clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

/// Query filters for listing projects
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct ProjectFilter {
    /// Substring match against the project name
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    50
}

impl Default for ProjectFilter {
    fn default() -> Self {
        Self {
            search: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

/// Paginated page of projects
///
/// `total` counts every project matching the filter, not just the page.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProjectPage {
    pub data: Vec<Project>,
    pub total: u64,
}

/// Confirmation returned after deleting a project
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteProjectResponse {
    pub message: String,
}

impl Project {
    /// Apply updates from UpdateProject DTO
    pub fn apply_update(&mut self, update: UpdateProject) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
    }
}
