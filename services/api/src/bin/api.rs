//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{FileKeyValueStore, GeminiLessonAdapter, PgKeyValueStore},
    build_router,
    config::Config,
    error::ApiError,
    web::state::AppState,
};
use lesson_planner_core::{KeyValueStore, LessonArchive, LessonPlanner};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Open the Archive Store ---
    let store: Arc<dyn KeyValueStore> = match &config.database_url {
        Some(database_url) => {
            info!("Connecting to database...");
            let db_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            let pg_store = PgKeyValueStore::new(db_pool);
            info!("Running database migrations...");
            pg_store.run_migrations().await?;
            info!("Database migrations complete.");
            Arc::new(pg_store)
        }
        None => {
            let file_store = FileKeyValueStore::open(config.archive_dir.clone()).await?;
            info!("Using file archive store in {}", file_store.dir().display());
            Arc::new(file_store)
        }
    };
    let archive = LessonArchive::load(store, config.archive_key.clone()).await?;

    // --- 3. Initialize the Generator Adapter ---
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not configured; lesson generation requests will fail.");
    }
    let generator = Arc::new(GeminiLessonAdapter::from_settings(
        config.gemini_api_key.as_deref(),
        &config.gemini_base_url,
        config.lesson_model.clone(),
    ));

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        planner: Arc::new(LessonPlanner::new(archive, generator)),
        config: config.clone(),
    });

    // --- 5. Create the Web Router ---
    let app = build_router(app_state);

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
