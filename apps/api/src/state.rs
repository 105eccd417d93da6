use std::sync::Arc;

use crate::analysis::analyzer::JobAnalyzer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Owns the vocabulary, insight generator and result store for the process lifetime.
    pub analyzer: Arc<JobAnalyzer>,
}
