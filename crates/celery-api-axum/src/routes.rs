//! Route definitions and router construction.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::bootstrap::AxumContext;
use crate::handlers;
use crate::state::AppState;

/// Create the Axum router with all routes.
pub fn create_router(ctx: AxumContext) -> Router {
    create_router_with_state(Arc::new(ctx))
}

/// Create the router around state the caller keeps a handle to.
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/tasks", post(handlers::tasks::create))
        .route("/broker/status", get(handlers::broker::status))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
