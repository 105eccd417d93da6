//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// POST /api/v1/analyses
///
/// Runs the full pipeline and returns the stored result.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let result = state.analyzer.analyze(&request.text).await?;
    Ok(Json(result))
}

/// GET /api/v1/analyses
pub async fn handle_list_analyses(State(state): State<AppState>) -> Json<Vec<AnalysisResult>> {
    Json(state.analyzer.list_results().await)
}

/// GET /api/v1/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<AnalysisResult>, AppError> {
    state
        .analyzer
        .store()
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))
}
