//! # Cartelera Server
//!
//! HTTP boundary for the movie catalog: request handlers, the uniform
//! response envelope, configuration, and router assembly. The catalog store
//! itself lives in `cartelera-core`; handlers reach it through [`AppState`].

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

pub mod api;
pub mod errors;
pub mod handlers;
pub mod infra;
pub mod routes;

pub use errors::{AppError, AppResult};
pub use infra::app_state::AppState;

/// Assemble the full application router for the given state.
///
/// Middleware (CORS, request tracing) is layered on by the binary; tests
/// drive this router directly.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .merge(routes::create_api_router())
        .with_state(state)
}

async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Cartelera movie catalog." }))
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
