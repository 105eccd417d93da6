use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::analysis::{AnalysisResult, NewAnalysis};
use crate::store::{next_id, save_timestamp, ResultStore, StoreError};

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryStore {
    records: RwLock<Vec<AnalysisResult>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResultStore for InMemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn append(&self, analysis: NewAnalysis) -> Result<AnalysisResult, StoreError> {
        let mut records = self.records.write().await;
        let result = analysis.into_result(next_id(&records)?, save_timestamp());
        records.push(result.clone());
        Ok(result)
    }

    async fn list_all(&self) -> Vec<AnalysisResult> {
        self.records.read().await.clone()
    }
}
