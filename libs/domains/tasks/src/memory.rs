//! Linked in-memory storage for projects and tasks.
//!
//! Both repositories share a single lock so that deleting a project and
//! cascading to its tasks happens atomically, mirroring the `ON DELETE
//! CASCADE` foreign key of the PostgreSQL schema.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use domain_projects::{
    CreateProject, Project, ProjectError, ProjectFilter, ProjectPage, ProjectRepository,
    ProjectResult, UpdateProject,
};

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, TaskFilter, UpdateTask};
use crate::repository::TaskRepository;

#[derive(Debug, Default)]
struct StoreState {
    projects: BTreeMap<i64, Project>,
    tasks: BTreeMap<i64, Task>,
    next_project_id: i64,
    next_task_id: i64,
}

/// Shared in-memory store (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle implementing `ProjectRepository` over this store
    pub fn projects(&self) -> InMemoryProjectStore {
        InMemoryProjectStore {
            state: self.state.clone(),
        }
    }

    /// Handle implementing `TaskRepository` over this store
    pub fn tasks(&self) -> InMemoryTaskStore {
        InMemoryTaskStore {
            state: self.state.clone(),
        }
    }
}

/// Project repository view of the linked store
#[derive(Debug, Clone)]
pub struct InMemoryProjectStore {
    state: Arc<RwLock<StoreState>>,
}

/// Task repository view of the linked store
#[derive(Debug, Clone)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<StoreState>>,
}

#[async_trait]
impl ProjectRepository for InMemoryProjectStore {
    async fn create(&self, input: CreateProject) -> ProjectResult<Project> {
        let mut state = self.state.write().await;

        state.next_project_id += 1;
        let project = Project {
            id: state.next_project_id,
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

        if state.projects.remove(&id).is_none() {
            return Ok(false);
        }

        // Cascade under the same write lock
        let before = state.tasks.len();
        state.tasks.retain(|_, task| task.project_id != id);

        tracing::info!(
            project_id = id,
            cascaded_tasks = before - state.tasks.len(),
            "Deleted project"
        );
        Ok(true)
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskStore {
    async fn create(&self, project_id: i64, input: CreateTask) -> TaskResult<Task> {
        let mut state = self.state.write().await;

        state.next_task_id += 1;
        let task = Task {
            id: state.next_task_id,
            title: input.title,
            is_completed: false,
            due_date: input.due_date,
            created_at: Utc::now(),
            project_id,
        };
        state.tasks.insert(task.id, task.clone());

        tracing::info!(task_id = task.id, project_id, "Created task");
        Ok(task)
    }

    async fn get_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let state = self.state.read().await;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self, project_id: i64, filter: TaskFilter) -> TaskResult<(Vec<Task>, u64)> {
        let state = self.state.read().await;

        let matching: Vec<&Task> = state
            .tasks
            .values()
            .filter(|t| t.project_id == project_id)
            .filter(|t| match filter.is_completed {
                Some(is_completed) => t.is_completed == is_completed,
                None => true,
            })
            .filter(|t| match filter.search {
                Some(ref search) => t.title.contains(search.as_str()),
                None => true,
            })
            .collect();

        let total = matching.len() as u64;
        let tasks: Vec<Task> = matching
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .cloned()
            .collect();

        Ok((tasks, total))
    }

    async fn update(&self, id: i64, input: UpdateTask) -> TaskResult<Task> {
        let mut state = self.state.write().await;

        let task = state.tasks.get_mut(&id).ok_or(TaskError::NotFound(id))?;
        task.apply_update(input);

        tracing::info!(task_id = id, "Updated task");
        Ok(task.clone())
    }

    async fn delete(&self, id: i64) -> TaskResult<bool> {
        let mut state = self.state.write().await;

        if state.tasks.remove(&id).is_some() {
            tracing::info!(task_id = id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed_project(store: &InMemoryStore, name: &str) -> Project {
        store
            .projects()
            .create(CreateProject {
                name: name.to_string(),
                description: None,
            })
            .await
            .unwrap()
    }

    async fn seed_task(store: &InMemoryStore, project_id: i64, title: &str) -> Task {
        store
            .tasks()
            .create(
                project_id,
                CreateTask {
                    title: title.to_string(),
                    due_date: None,
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_delete_project_cascades_to_tasks() {
        let store = InMemoryStore::new();

        let kept = seed_project(&store, "kept").await;
        let doomed = seed_project(&store, "doomed").await;

        seed_task(&store, kept.id, "survives").await;
        let casualty = seed_task(&store, doomed.id, "goes away").await;

        let deleted = store.projects().delete(doomed.id).await.unwrap();
        assert!(deleted);

        assert!(
            store
                .tasks()
                .get_by_id(casualty.id)
                .await
                .unwrap()
                .is_none()
        );

        let (remaining, total) = store
            .tasks()
            .list(kept.id, TaskFilter::default())
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(remaining[0].title, "survives");
    }

    #[tokio::test]
    async fn test_task_ids_survive_project_deletion() {
        let store = InMemoryStore::new();

        let first = seed_project(&store, "first").await;
        seed_task(&store, first.id, "one").await;
        store.projects().delete(first.id).await.unwrap();

        // Ids are never reused after a cascade
        let second = seed_project(&store, "second").await;
        let task = seed_task(&store, second.id, "two").await;
        assert_eq!(task.id, 2);
    }

    #[tokio::test]
    async fn test_list_filters_are_conjunctive() {
        let store = InMemoryStore::new();
        let project = seed_project(&store, "inbox").await;

        let done = seed_task(&store, project.id, "ship release").await;
        seed_task(&store, project.id, "ship docs").await;
        seed_task(&store, project.id, "triage bugs").await;

        store
            .tasks()
            .update(
                done.id,
                UpdateTask {
                    is_completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let (tasks, total) = store
            .tasks()
            .list(
                project.id,
                TaskFilter {
                    is_completed: Some(true),
                    search: Some("ship".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(total, 1);
        assert_eq!(tasks[0].id, done.id);
    }

    #[tokio::test]
    async fn test_list_total_counts_beyond_page() {
        let store = InMemoryStore::new();
        let project = seed_project(&store, "inbox").await;

        for i in 0..15 {
            seed_task(&store, project.id, &format!("task {}", i)).await;
        }

        let (tasks, total) = store
            .tasks()
            .list(project.id, TaskFilter::default())
            .await
            .unwrap();

        // Default page size is 10, total still reflects every match
        assert_eq!(tasks.len(), 10);
        assert_eq!(total, 15);
    }

    #[tokio::test]
    async fn test_list_offset_beyond_end_is_empty() {
        let store = InMemoryStore::new();
        let project = seed_project(&store, "inbox").await;
        seed_task(&store, project.id, "only one").await;

        let (tasks, total) = store
            .tasks()
            .list(
                project.id,
                TaskFilter {
                    offset: 5,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(tasks.is_empty());
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_tasks_are_scoped_to_their_project() {
        let store = InMemoryStore::new();

        let a = seed_project(&store, "a").await;
        let b = seed_project(&store, "b").await;
        seed_task(&store, a.id, "for a").await;
        seed_task(&store, b.id, "for b").await;

        let (tasks, total) = store
            .tasks()
            .list(a.id, TaskFilter::default())
            .await
            .unwrap();

        assert_eq!(total, 1);
        assert_eq!(tasks[0].title, "for a");
    }
}
