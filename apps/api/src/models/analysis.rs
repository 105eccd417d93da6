use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Seniority bucket assigned to a job description. Exactly one per analysis.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ExperienceLevel {
    Junior,
    #[default]
    #[serde(rename = "Mid-level")]
    MidLevel,
    Senior,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "Junior",
            ExperienceLevel::MidLevel => "Mid-level",
            ExperienceLevel::Senior => "Senior",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Skills matched against the configured vocabularies.
/// Sets are ordered only so serialized output is stable; callers must not rely on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSet {
    pub technical_skills: BTreeSet<String>,
    pub soft_skills: BTreeSet<String>,
}

/// An analysis that has not been persisted yet. The store assigns `id` and `timestamp`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnalysis {
    pub original_text: String,
    pub cleaned_text: String,
    pub skills: SkillSet,
    pub experience_level: ExperienceLevel,
    pub insight: String,
}

impl NewAnalysis {
    pub fn into_result(self, id: u64, timestamp: String) -> AnalysisResult {
        AnalysisResult {
            original_text: self.original_text,
            cleaned_text: self.cleaned_text,
            skills: self.skills,
            experience_level: self.experience_level,
            insight: self.insight,
            timestamp,
            id,
        }
    }
}

/// A persisted analysis record. Field names are the on-disk format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub original_text: String,
    pub cleaned_text: String,
    pub skills: SkillSet,
    pub experience_level: ExperienceLevel,
    pub insight: String,
    /// ISO-8601, assigned at save time.
    pub timestamp: String,
    pub id: u64,
}
