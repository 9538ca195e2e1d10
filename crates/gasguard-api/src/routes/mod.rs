//! API route handlers

pub mod gasguard;
pub mod health;

use axum::{routing::get, Router};

use crate::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(gasguard::banner))
        .route("/health", get(health::health_check))
        .nest("/api/v1/gasguard", gasguard::router())
        .with_state(state)
}
