//! Insight collaborator: a short prose summary of an analyzed job description.
//!
//! The backend behind [`InsightBackend`] is advisory. Every failure mode
//! (no backend, error, timeout, degenerate output) resolves to the
//! deterministic [`fallback_insight`], so [`InsightGenerator::generate`] never fails.

pub mod llm;
pub mod prompts;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::insight::prompts::{INSIGHT_PROMPT_TEMPLATE, MAX_PROMPT_TEXT_CHARS};
use crate::models::analysis::{ExperienceLevel, SkillSet};

/// Backend output shorter than this (after trimming) is treated as degenerate.
pub const MIN_INSIGHT_CHARS: usize = 10;

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("insight backend failed: {0}")]
    Backend(String),
}

/// A text-generation backend. Implementations perform at most one external call per invocation.
#[async_trait]
pub trait InsightBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, InsightError>;
}

/// Wraps an optional backend with the timeout and fallback policy.
#[derive(Clone)]
pub struct InsightGenerator {
    backend: Option<Arc<dyn InsightBackend>>,
    timeout: Duration,
}

impl InsightGenerator {
    pub fn new(backend: Option<Arc<dyn InsightBackend>>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// Generator with no backend: always answers with the fallback.
    pub fn fallback_only() -> Self {
        Self::new(None, Duration::ZERO)
    }

    pub fn backend_name(&self) -> Option<&str> {
        self.backend.as_deref().map(|b| b.name())
    }

    pub async fn generate(
        &self,
        cleaned_text: &str,
        skills: &SkillSet,
        level: ExperienceLevel,
    ) -> String {
        let Some(backend) = self.backend.as_deref() else {
            debug!("No insight backend configured, using fallback");
            return fallback_insight(skills, level);
        };

        let prompt = build_prompt(cleaned_text, skills, level);

        match tokio::time::timeout(self.timeout, backend.generate(&prompt)).await {
            Ok(Ok(text)) => {
                let text = text.trim();
                if text.chars().count() < MIN_INSIGHT_CHARS {
                    warn!(
                        "Insight backend '{}' returned degenerate output ({} chars), using fallback",
                        backend.name(),
                        text.chars().count()
                    );
                    fallback_insight(skills, level)
                } else {
                    info!("Insight generated by '{}'", backend.name());
                    text.to_string()
                }
            }
            Ok(Err(e)) => {
                warn!("Insight backend '{}' failed: {e}, using fallback", backend.name());
                fallback_insight(skills, level)
            }
            Err(_) => {
                warn!(
                    "Insight backend '{}' timed out after {}ms, using fallback",
                    backend.name(),
                    self.timeout.as_millis()
                );
                fallback_insight(skills, level)
            }
        }
    }
}

/// Deterministic summary built only from the extracted skills and level.
pub fn fallback_insight(skills: &SkillSet, level: ExperienceLevel) -> String {
    let technical = if skills.technical_skills.is_empty() {
        "a general technical skill set".to_string()
    } else {
        join(skills.technical_skills.iter())
    };
    let soft = if skills.soft_skills.is_empty() {
        "interpersonal skills".to_string()
    } else {
        join(skills.soft_skills.iter())
    };

    format!(
        "This is a {level} position focused on {technical}. \
        Ideal candidates should have strong {soft} and relevant industry experience."
    )
}

pub fn build_prompt(cleaned_text: &str, skills: &SkillSet, level: ExperienceLevel) -> String {
    let excerpt: String = cleaned_text.chars().take(MAX_PROMPT_TEXT_CHARS).collect();
    INSIGHT_PROMPT_TEMPLATE
        .replace("{experience_level}", level.as_str())
        .replace("{technical_skills}", &join(skills.technical_skills.iter()))
        .replace("{soft_skills}", &join(skills.soft_skills.iter()))
        .replace("{job_description}", &excerpt)
}

fn join<'a>(items: impl Iterator<Item = &'a String>) -> String {
    items.map(String::as_str).collect::<Vec<_>>().join(", ")
}
