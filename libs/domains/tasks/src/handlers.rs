use axum::{
    Json, Router, middleware,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{ErrorResponse, JwtAuth, ValidatedJson, jwt_auth_middleware};
use domain_projects::ProjectRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::TaskResult;
use crate::models::{
    CreateTask, DeleteTaskResponse, TaskFilter, TaskPage, TaskWithProject, UpdateTask,
};
use crate::repository::TaskRepository;
use crate::service::TaskService;

const TAG: &str = "tasks";

/// OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_tasks,
        create_task,
        get_task,
        update_task,
        delete_task,
    ),
    components(schemas(
        TaskWithProject,
        CreateTask,
        UpdateTask,
        TaskPage,
        DeleteTaskResponse,
        ErrorResponse
    )),
    tags(
        (name = TAG, description = "Task management endpoints (bearer token required)")
    )
)]
pub struct ApiDoc;

/// Create the task router with all HTTP endpoints
///
/// Every route is guarded by the JWT bearer-token middleware.
pub fn router<R, P>(service: TaskService<R, P>, auth: JwtAuth) -> Router
where
    R: TaskRepository + 'static,
    P: ProjectRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/projects/{project_id}/tasks",
            get(list_tasks).post(create_task),
        )
        .route(
            "/tasks/{id}",
            get(get_task).patch(update_task).delete(delete_task),
        )
        .layer(middleware::from_fn_with_state(auth, jwt_auth_middleware))
        .with_state(shared_service)
}

/// List tasks of a project with optional filters
#[utoipa::path(
    get,
    path = "/projects/{project_id}/tasks",
    tag = TAG,
    params(
        ("project_id" = i64, Path, description = "Owning project ID"),
        TaskFilter
    ),
    responses(
        (status = 200, description = "Page of tasks with total count", body = TaskPage),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn list_tasks<R: TaskRepository, P: ProjectRepository>(
    State(service): State<Arc<TaskService<R, P>>>,
    Path(project_id): Path<i64>,
    Query(filter): Query<TaskFilter>,
) -> TaskResult<Json<TaskPage>> {
    let page = service.list_tasks(project_id, filter).await?;
    Ok(Json(page))
}

/// Create a new task under a project
#[utoipa::path(
    post,
    path = "/projects/{project_id}/tasks",
    tag = TAG,
    params(
        ("project_id" = i64, Path, description = "Owning project ID")
    ),
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created successfully", body = TaskWithProject),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn create_task<R: TaskRepository, P: ProjectRepository>(
    State(service): State<Arc<TaskService<R, P>>>,
    Path(project_id): Path<i64>,
    ValidatedJson(input): ValidatedJson<CreateTask>,
) -> TaskResult<impl IntoResponse> {
    let task = service.create_task(project_id, input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/tasks/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = TaskWithProject),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_task<R: TaskRepository, P: ProjectRepository>(
    State(service): State<Arc<TaskService<R, P>>>,
    Path(id): Path<i64>,
) -> TaskResult<Json<TaskWithProject>> {
    let task = service.get_task(id).await?;
    Ok(Json(task))
}

/// Update a task
#[utoipa::path(
    patch,
    path = "/tasks/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated successfully", body = TaskWithProject),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn update_task<R: TaskRepository, P: ProjectRepository>(
    State(service): State<Arc<TaskService<R, P>>>,
    Path(id): Path<i64>,
    ValidatedJson(input): ValidatedJson<UpdateTask>,
) -> TaskResult<Json<TaskWithProject>> {
    let task = service.update_task(id, input).await?;
    Ok(Json(task))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task deleted successfully", body = DeleteTaskResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn delete_task<R: TaskRepository, P: ProjectRepository>(
    State(service): State<Arc<TaskService<R, P>>>,
    Path(id): Path<i64>,
) -> TaskResult<Json<DeleteTaskResponse>> {
    let response = service.delete_task(id).await?;
    Ok(Json(response))
}
