pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::dashboard::handlers as dashboard;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route(
            "/api/v1/analyses",
            post(handlers::handle_analyze).get(handlers::handle_list_analyses),
        )
        .route("/api/v1/analyses/:id", get(handlers::handle_get_analysis))
        // Dashboard API
        .route("/api/v1/history", get(dashboard::handle_history))
        .route("/api/v1/dashboard", get(dashboard::handle_dashboard))
        .with_state(state)
}
