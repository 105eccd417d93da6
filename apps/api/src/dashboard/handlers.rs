use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::dashboard::summary::{search_history, summarize, DashboardSummary};
use crate::models::analysis::AnalysisResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(State(state): State<AppState>) -> Json<DashboardSummary> {
    let results = state.analyzer.list_results().await;
    Json(summarize(&results))
}

/// GET /api/v1/history?q=
///
/// Newest first. `q` filters on original text, insight and technical skills.
pub async fn handle_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Json<Vec<AnalysisResult>> {
    let results = state.analyzer.list_results().await;
    let matches = search_history(&results, &params.q)
        .into_iter()
        .cloned()
        .collect();
    Json(matches)
}
