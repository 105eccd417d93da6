//! Result Store: append-only persistence for analysis results.
//!
//! `AppState` carries an `Arc<dyn ResultStore>`; the backend is picked at startup
//! from `STORE_BACKEND`. Every backend serializes `append` so ids stay
//! `max_id + 1` under concurrent requests.

pub mod file;
pub mod memory;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use thiserror::Error;

use crate::models::analysis::{AnalysisResult, NewAnalysis};

pub use file::JsonFileStore;
pub use memory::InMemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Background write task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("No ids left: the highest stored id is u64::MAX")]
    IdExhausted,
}

#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Short backend label for logs.
    fn backend(&self) -> &'static str;

    /// Persists `analysis`, assigning the next id and a save-time timestamp.
    async fn append(&self, analysis: NewAnalysis) -> Result<AnalysisResult, StoreError>;

    /// All results in insertion order. Unreadable storage reads as empty.
    async fn list_all(&self) -> Vec<AnalysisResult>;

    async fn get(&self, id: u64) -> Option<AnalysisResult> {
        self.list_all().await.into_iter().find(|r| r.id == id)
    }
}

/// `max(id) + 1`, or 1 for an empty collection.
pub(crate) fn next_id(records: &[AnalysisResult]) -> Result<u64, StoreError> {
    records
        .iter()
        .map(|r| r.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(StoreError::IdExhausted)
}

/// ISO-8601 (RFC 3339) UTC timestamp for a record being saved now.
pub(crate) fn save_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
