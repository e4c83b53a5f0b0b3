use chrono::{DateTime, Utc};
use domain_projects::Project;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Task entity - a unit of work owned by exactly one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Unique identifier
    pub id: i64,
    /// Task title
    pub title: String,
    /// Whether the task is completed
    pub is_completed: bool,
    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Owning project
    pub project_id: i64,
}

/// Task together with its eagerly resolved owning project
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskWithProject {
    pub id: i64,
    pub title: String,
    pub is_completed: bool,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub project: Project,
}

impl TaskWithProject {
    pub fn new(task: Task, project: Project) -> Self {
        Self {
            id: task.id,
            title: task.title,
            is_completed: task.is_completed,
            due_date: task.due_date,
            created_at: task.created_at,
            project,
        }
    }
}

/// DTO for creating a new task
///
/// The owning project comes from the URL path, not the body. New tasks
/// always start out incomplete.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub due_date: Option<DateTime<Utc>>,
}

/// DTO for updating an existing task
///
/// `due_date` is doubly optional: a missing field leaves the current
/// value untouched, while `Some(None)` clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub is_completed: Option<bool>,
    pub due_date: Option<Option<DateTime<Utc>>>,
}

/// Query filters for listing tasks within a project
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct TaskFilter {
    /// Filter by completion state
    pub is_completed: Option<bool>,
    /// Substring match against the task title
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    10
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self {
            is_completed: None,
            search: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

/// Paginated page of tasks with their owning project attached
///
/// `total` counts every task matching the filter, not just the page.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TaskPage {
    pub tasks: Vec<TaskWithProject>,
    pub total: u64,
}

/// Confirmation returned after deleting a task
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteTaskResponse {
    pub message: String,
}

impl Task {
    /// Apply updates from UpdateTask DTO
    pub fn apply_update(&mut self, update: UpdateTask) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(is_completed) = update.is_completed {
            self.is_completed = is_completed;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
    }
}
