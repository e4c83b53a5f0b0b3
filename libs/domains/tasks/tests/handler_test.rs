//! Handler tests for the Tasks domain
//!
//! These tests exercise the auth-guarded task routes against the linked
//! in-memory store, including the bearer-token middleware.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::{JwtAuth, JwtConfig};
use domain_projects::{CreateProject, ProjectService};
use domain_tasks::*;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

struct TestApp {
    app: Router,
    token: String,
    store: InMemoryStore,
}

fn test_app() -> TestApp {
    let store = InMemoryStore::new();
    let service = TaskService::new(store.tasks(), ProjectService::new(store.projects()));

    let auth = JwtAuth::new(&JwtConfig::new("handler-test-secret-that-is-32-chars!"));
    let token = auth.create_access_token(1, "tester@example.com").unwrap();

    TestApp {
        app: handlers::router(service, auth),
        token,
        store,
    }
}

async fn seed_project(store: &InMemoryStore, name: &str) -> i64 {
    ProjectService::new(store.projects())
        .create_project(CreateProject {
            name: name.to_string(),
            description: None,
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_task_routes_require_bearer_token() {
    let TestApp { app, .. } = test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/projects/1/tasks")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_task_routes_reject_garbage_token() {
    let TestApp { app, .. } = test_app();

    let request = Request::builder()
        .method("GET")
        .uri("/tasks/1")
        .header("authorization", "Bearer not-a-real-token")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_task_handler_returns_201_with_project() {
    let TestApp { app, token, store } = test_app();
    let project_id = seed_project(&store, "inbox").await;

    let request = Request::builder()
        .method("POST")
        .uri(format!("/projects/{}/tasks", project_id))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "title": "write docs"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let task: TaskWithProject = json_body(response.into_body()).await;
    assert_eq!(task.id, 1);
    assert_eq!(task.title, "write docs");
    assert!(!task.is_completed);
    assert_eq!(task.project.id, project_id);
}

#[tokio::test]
async fn test_create_task_under_missing_project_returns_404() {
    let TestApp { app, token, .. } = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/projects/999/tasks")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "title": "orphan"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body_str = String::from_utf8(body_bytes.to_vec()).unwrap();
    assert!(body_str.contains("Project 999 not found!"));
}

#[tokio::test]
async fn test_list_tasks_handler_returns_page() {
    let TestApp { app, token, store } = test_app();
    let project_id = seed_project(&store, "inbox").await;

    let tasks = store.tasks();
    use domain_tasks::TaskRepository;
    for title in ["one", "two", "three"] {
        tasks
            .create(
                project_id,
                CreateTask {
                    title: title.to_string(),
                    due_date: None,
                },
            )
            .await
            .unwrap();
    }

    let request = Request::builder()
        .method("GET")
        .uri(format!("/projects/{}/tasks?limit=2", project_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let page: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(page["total"], 3);
    assert_eq!(page["tasks"].as_array().unwrap().len(), 2);
    assert_eq!(page["tasks"][0]["title"], "one");
    assert_eq!(page["tasks"][0]["project"]["id"], project_id);
}

#[tokio::test]
async fn test_delete_task_handler_returns_confirmation() {
    let TestApp { app, token, store } = test_app();
    let project_id = seed_project(&store, "inbox").await;

    use domain_tasks::TaskRepository;
    let task = store
        .tasks()
        .create(
            project_id,
            CreateTask {
                title: "done soon".to_string(),
                due_date: None,
            },
        )
        .await
        .unwrap();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/tasks/{}", task.id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let confirmation: DeleteTaskResponse = json_body(response.into_body()).await;
    assert_eq!(
        confirmation.message,
        format!("Task {} was successfully deleted", task.id)
    );
}
