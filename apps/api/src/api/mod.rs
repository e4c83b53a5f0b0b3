use axum::Router;
use axum_helpers::JwtAuth;
use sea_orm::DatabaseConnection;

use domain_projects::{PgProjectRepository, ProjectService};
use domain_tasks::{PgTaskRepository, TaskService};
use domain_users::{AuthService, PgUserRepository};

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Wires Postgres repositories into services into domain routers. The
/// returned router is stateless; each domain applies its own state.
pub fn routes(db: DatabaseConnection, jwt_auth: JwtAuth) -> Router {
    let auth_service = AuthService::new(PgUserRepository::new(db.clone()), jwt_auth.clone());
    let project_service = ProjectService::new(PgProjectRepository::new(db.clone()));
    let task_service = TaskService::new(
        PgTaskRepository::new(db.clone()),
        ProjectService::new(PgProjectRepository::new(db)),
    );

    Router::new()
        .nest("/auth", domain_users::handlers::router(auth_service))
        .merge(domain_projects::handlers::router(project_service))
        .merge(domain_tasks::handlers::router(task_service, jwt_auth))
}
