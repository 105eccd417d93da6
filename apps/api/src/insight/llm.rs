use async_trait::async_trait;

use crate::insight::prompts::INSIGHT_SYSTEM;
use crate::insight::{InsightBackend, InsightError};
use crate::llm_client::{LlmClient, MODEL};

/// Insight backend that asks the Anthropic Messages API for a summary.
pub struct LlmInsightBackend {
    llm: LlmClient,
}

impl LlmInsightBackend {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl InsightBackend for LlmInsightBackend {
    fn name(&self) -> &str {
        MODEL
    }

    async fn generate(&self, prompt: &str) -> Result<String, InsightError> {
        self.llm
            .complete(prompt, INSIGHT_SYSTEM)
            .await
            .map_err(|e| InsightError::Backend(e.to_string()))
    }
}
