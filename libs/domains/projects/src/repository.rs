use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProjectError, ProjectResult};
use crate::models::{CreateProject, Project, ProjectFilter, ProjectPage, UpdateProject};

/// Repository trait for Project persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Create a new project
    async fn create(&self, input: CreateProject) -> ProjectResult<Project>;

    /// Get a project by ID
    async fn get_by_id(&self, id: i64) -> ProjectResult<Option<Project>>;

    /// List projects with optional filters, returning the page and the
    /// total count of matching projects
    async fn list(&self, filter: ProjectFilter) -> ProjectResult<ProjectPage>;

    /// Update an existing project
    async fn update(&self, id: i64, input: UpdateProject) -> ProjectResult<Project>;

    /// Delete a project by ID, returning whether a row was removed
    async fn delete(&self, id: i64) -> ProjectResult<bool>;
}

#[derive(Debug, Default)]
struct InMemoryState {
    projects: BTreeMap<i64, Project>,
    next_id: i64,
}

/// In-memory implementation of ProjectRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProjectRepository {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(&self, input: CreateProject) -> ProjectResult<Project> {
        let mut state = self.state.write().await;

        state.next_id += 1;
        let project = Project {
            id: state.next_id,
            name: input.name,
            description: input.description,
            created_at: Utc::now(),
        };
        state.projects.insert(project.id, project.clone());

        tracing::info!(project_id = project.id, "Created project");
        Ok(project)
    }

    async fn get_by_id(&self, id: i64) -> ProjectResult<Option<Project>> {
        let state = self.state.read().await;
        Ok(state.projects.get(&id).cloned())
    }

    async fn list(&self, filter: ProjectFilter) -> ProjectResult<ProjectPage> {
        let state = self.state.read().await;

        // BTreeMap iteration yields ascending ids, matching insertion order
        let matching: Vec<&Project> = state
            .projects
            .values()
            .filter(|p| match filter.search {
                Some(ref search) => p.name.contains(search.as_str()),
                None => true,
            })
            .collect();

        let total = matching.len() as u64;
        let data: Vec<Project> = matching
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .cloned()
            .collect();

        Ok(ProjectPage { data, total })
    }

    async fn update(&self, id: i64, input: UpdateProject) -> ProjectResult<Project> {
        let mut state = self.state.write().await;

        let project = state
            .projects
            .get_mut(&id)
            .ok_or(ProjectError::NotFound(id))?;
        project.apply_update(input);

        tracing::info!(project_id = id, "Updated project");
        Ok(project.clone())
    }

    async fn delete(&self, id: i64) -> ProjectResult<bool> {
        let mut state = self.state.write().await;

        if state.projects.remove(&id).is_some() {
            tracing::info!(project_id = id, "Deleted project");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryProjectRepository::new();

        let first = repo
            .create(CreateProject {
                name: "alpha".to_string(),
                description: None,
            })
            .await
            .unwrap();
        let second = repo
            .create(CreateProject {
                name: "beta".to_string(),
                description: None,
            })
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_list_counts_total_before_pagination() {
        let repo = InMemoryProjectRepository::new();

        for name in ["alpha", "beta", "gamma"] {
            repo.create(CreateProject {
                name: name.to_string(),
                description: None,
            })
            .await
            .unwrap();
        }

        let page = repo
            .list(ProjectFilter {
                search: None,
                limit: 2,
                offset: 0,
            })
            .await
            .unwrap();

        assert_eq!(page.data.len(), 2);
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn test_list_search_matches_substring() {
        let repo = InMemoryProjectRepository::new();

        for name in ["backend", "frontend", "ops"] {
            repo.create(CreateProject {
                name: name.to_string(),
                description: None,
            })
            .await
            .unwrap();
        }

        let page = repo
            .list(ProjectFilter {
                search: Some("end".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        assert!(page.data.iter().all(|p| p.name.contains("end")));
    }

    #[tokio::test]
    async fn test_update_missing_project_is_not_found() {
        let repo = InMemoryProjectRepository::new();

        let result = repo.update(404, UpdateProject::default()).await;
        assert!(matches!(result, Err(ProjectError::NotFound(404))));
    }
}
