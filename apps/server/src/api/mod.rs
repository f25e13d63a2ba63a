//! API layer - routes, handlers, and middleware

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::json;
use std::path::PathBuf;
use tower_http::services::{ServeDir, ServeFile};

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let max_body_size = state.config.server.max_request_body_size;
    let cors_origins = state.config.server.cors_origins.clone();
    let static_dir = state.config.server.static_dir.clone();

    let mut router = Router::new()
        .route("/health", get(health_check))
        .nest("/api", routes::api::api_routes(state.clone()))
        .with_state(state);

    // Built frontend; unknown paths fall through to index.html for client routing.
    if let Some(dir) = static_dir {
        let dir = PathBuf::from(dir);
        let index = dir.join("index.html");
        router = router.fallback_service(ServeDir::new(&dir).fallback(ServeFile::new(index)));
    }

    // Middleware applied in reverse order
    router
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(middleware::compression())
        .layer(middleware::cors(&cors_origins))
        .layer(middleware::trace())
        .layer(DefaultBodyLimit::max(max_body_size))
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "staybook",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
