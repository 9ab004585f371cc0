//! services/api/src/lib.rs
//!
//! HTTP service for the lesson planner: adapters for the core ports, configuration,
//! and the axum router.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        Method,
    },
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::web::{
    analytics_handler, delete_lesson_handler, export_lesson_handler, generate_lesson_handler,
    health_handler, list_lessons_handler, rest::ApiDoc, save_lesson_handler, state::AppState,
    update_scores_handler,
};

/// Largest accepted request body (generated lessons are sent back when saving).
pub const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Builds the complete application router, including the Swagger UI.
pub fn build_router(app_state: Arc<AppState>) -> Router {
    let cors = match app_state.config.cors_origin.clone() {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE, ACCEPT]),
        None => CorsLayer::permissive(),
    };

    let api_router = Router::new()
        .route("/api/generate-lesson", post(generate_lesson_handler))
        .route(
            "/api/lessons",
            get(list_lessons_handler).post(save_lesson_handler),
        )
        .route("/api/lessons/{index}", delete(delete_lesson_handler))
        .route("/api/lessons/{index}/scores", put(update_scores_handler))
        .route("/api/lessons/{index}/export", get(export_lesson_handler))
        .route("/api/analytics", get(analytics_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
