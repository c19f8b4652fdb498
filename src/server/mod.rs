//! HTTP server boundary
//!
//! Axum router for the gateway: the chat operation, the liveness probe, and
//! the request-tracing/CORS layers.

pub mod handlers;

pub use handlers::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the gateway router with all routes and layers configured.
#[must_use]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health_handler))
        .route("/chat", post(handlers::chat_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
