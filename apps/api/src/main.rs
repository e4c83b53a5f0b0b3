use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

use taskhub_api::{api, config::Config, openapi};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    database::postgres::run_migrations::<migration::Migrator>(&db, "taskhub_api")
        .await
        .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;

    let jwt_auth = axum_helpers::JwtAuth::new(&config.jwt);

    // Build router with API routes
    let api_routes = api::routes(db.clone(), jwt_auth);

    // create_router adds docs/middleware to our composed routes
    let app =
        axum_helpers::create_router::<openapi::ApiDoc>(api_routes).merge(api::health::router());

    info!("Starting taskhub API");

    axum_helpers::serve(app, &config.server).await?;

    info!("Shutting down: closing database connection");
    match db.close().await {
        Ok(_) => info!("PostgreSQL connection closed successfully"),
        Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
    }

    info!("Taskhub API shutdown complete");
    Ok(())
}
