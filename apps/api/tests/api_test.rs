//! End-to-end API tests
//!
//! Exercises the fully composed router (auth, projects, tasks, docs
//! plumbing) against in-memory stores: register -> login -> create
//! project -> create task -> list -> cascade delete -> 404.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum_helpers::{JwtAuth, JwtConfig};
use domain_projects::ProjectService;
use domain_tasks::{InMemoryStore, TaskService};
use domain_users::{AuthService, InMemoryUserRepository};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn test_app() -> Router {
    let store = InMemoryStore::new();
    let jwt_auth = JwtAuth::new(&JwtConfig::new("api-test-secret-that-is-32-chars-long!"));

    let auth_service = AuthService::new(InMemoryUserRepository::new(), jwt_auth.clone());
    let project_service = ProjectService::new(store.projects());
    let task_service = TaskService::new(store.tasks(), ProjectService::new(store.projects()));

    let api_routes = Router::new()
        .nest("/auth", domain_users::handlers::router(auth_service))
        .merge(domain_projects::handlers::router(project_service))
        .merge(domain_tasks::handlers::router(task_service, jwt_auth));

    axum_helpers::create_router::<taskhub_api::openapi::ApiDoc>(api_routes)
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register_and_login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/register",
            None,
            json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "hunter22"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/login",
            None,
            json!({
                "email": "ada@example.com",
                "password": "hunter22"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_full_lifecycle_with_cascade_delete() {
    let app = test_app();
    let token = register_and_login(&app).await;

    // Create a project (no token required)
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/projects",
            None,
            json!({ "name": "backend", "description": "API rewrite" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let project = json_body(response.into_body()).await;
    assert_eq!(project["id"], 1);

    // Create a task under it (token required)
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/projects/1/tasks",
            Some(&token),
            json!({ "title": "write docs" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let task = json_body(response.into_body()).await;
    assert_eq!(task["id"], 1);
    assert_eq!(task["is_completed"], false);
    assert_eq!(task["project"]["name"], "backend");

    // List tasks for the project
    let response = app
        .clone()
        .oneshot(empty_request(
            Method::GET,
            "/api/projects/1/tasks",
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = json_body(response.into_body()).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["tasks"][0]["title"], "write docs");

    // Delete the project; tasks go with it
    let response = app
        .clone()
        .oneshot(empty_request(Method::DELETE, "/api/projects/1", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let confirmation = json_body(response.into_body()).await;
    assert_eq!(
        confirmation["message"],
        "Project 1 has been successfully deleted"
    );

    // The cascaded task is gone
    let response = app
        .clone()
        .oneshot(empty_request(Method::GET, "/api/tasks/1", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_task_routes_are_gated_and_project_routes_are_not() {
    let app = test_app();

    // Project creation works without a token
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/projects",
            None,
            json!({ "name": "open" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Task routes reject missing tokens
    let response = app
        .clone()
        .oneshot(empty_request(Method::GET, "/api/projects/1/tasks", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // And invalid ones
    let response = app
        .clone()
        .oneshot(empty_request(
            Method::GET,
            "/api/tasks/1",
            Some("not-a-token"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = test_app();

    let payload = json!({
        "name": "Ada",
        "email": "ada@example.com",
        "password": "hunter22"
    });

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/register",
            None,
            payload.clone(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/register",
            None,
            payload,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = test_app();

    let response = app
        .oneshot(empty_request(Method::GET, "/api-docs/openapi.json", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Paths are keyed relative to the `/api` server base
    let doc = json_body(response.into_body()).await;
    assert_eq!(doc["servers"][0]["url"], "/api");
    assert!(doc["paths"]["/auth/login"].is_object());
    assert!(doc["paths"]["/projects"].is_object());
    assert!(doc["paths"]["/projects/{project_id}/tasks"].is_object());
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = test_app();

    let response = app
        .oneshot(empty_request(Method::GET, "/api/nope", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
