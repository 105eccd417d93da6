use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus which store and insight backends are active.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "joblens-api",
        "store": state.analyzer.store().backend(),
        "insight_backend": state.analyzer.insight_backend().unwrap_or("fallback"),
    }))
}
