use utoipa::OpenApi;

/// Base document: API metadata plus the auth routes, which are the only
/// ones documented with paths relative to their mount point.
#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Taskhub API",
        version = "0.1.0",
        description = "API for managing projects, tasks, and user accounts"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/auth", api = domain_users::handlers::ApiDoc)
    )
)]
struct BaseApiDoc;

/// Combined OpenAPI documentation for the whole API surface.
///
/// Project and task docs already carry absolute paths, so they are merged
/// into the base document rather than nested under a prefix.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = BaseApiDoc::openapi();
        doc.merge(domain_projects::handlers::ApiDoc::openapi());
        doc.merge(domain_tasks::handlers::ApiDoc::openapi());
        doc
    }
}
