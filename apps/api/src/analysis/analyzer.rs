//! Job analysis: orchestrates the full pipeline for one job description.
//!
//! Flow: validate → clean_text → {extract_skills, classify_experience} →
//!       insight (fallback on any backend failure) → store.append → return.
//!
//! Every collaborator is injected at construction; nothing here is global.

use std::sync::Arc;

use tracing::info;

use crate::analysis::cleaner::{clean_text, CleanOptions};
use crate::analysis::experience::classify_experience;
use crate::analysis::skills::extract_skills;
use crate::analysis::vocabulary::Vocabulary;
use crate::errors::AppError;
use crate::insight::InsightGenerator;
use crate::models::analysis::{AnalysisResult, NewAnalysis};
use crate::store::ResultStore;

pub struct JobAnalyzer {
    vocabulary: Arc<Vocabulary>,
    clean_options: CleanOptions,
    insight: InsightGenerator,
    store: Arc<dyn ResultStore>,
}

impl JobAnalyzer {
    pub fn new(
        vocabulary: Arc<Vocabulary>,
        clean_options: CleanOptions,
        insight: InsightGenerator,
        store: Arc<dyn ResultStore>,
    ) -> Self {
        Self {
            vocabulary,
            clean_options,
            insight,
            store,
        }
    }

    pub fn store(&self) -> &dyn ResultStore {
        self.store.as_ref()
    }

    pub fn insight_backend(&self) -> Option<&str> {
        self.insight.backend_name()
    }

    /// Runs the whole pipeline and persists the result before returning it.
    ///
    /// Empty or whitespace-only input is rejected before any stage runs.
    pub async fn analyze(&self, raw_text: &str) -> Result<AnalysisResult, AppError> {
        if raw_text.trim().is_empty() {
            return Err(AppError::Validation(
                "Job description text cannot be empty".to_string(),
            ));
        }

        let cleaned_text = clean_text(Some(raw_text), self.clean_options);
        let skills = extract_skills(&cleaned_text, &self.vocabulary);
        let experience_level = classify_experience(&cleaned_text, &self.vocabulary);
        info!(
            "Analyzed JD: {} technical, {} soft skills, level={}",
            skills.technical_skills.len(),
            skills.soft_skills.len(),
            experience_level
        );

        let insight = self
            .insight
            .generate(&cleaned_text, &skills, experience_level)
            .await;

        let result = self
            .store
            .append(NewAnalysis {
                original_text: raw_text.to_string(),
                cleaned_text,
                skills,
                experience_level,
                insight,
            })
            .await?;

        info!("Analysis #{} stored ({})", result.id, self.store.backend());
        Ok(result)
    }

    /// Every stored result, insertion order.
    pub async fn list_results(&self) -> Vec<AnalysisResult> {
        self.store.list_all().await
    }
}
