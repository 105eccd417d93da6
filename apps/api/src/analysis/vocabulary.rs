//! Keyword vocabularies: the fixed word lists driving skill extraction and
//! experience classification.
//!
//! Loaded once at startup (built-in defaults, or a JSON file via `VOCABULARY_FILE`)
//! and shared read-only. Any list missing from the file keeps its default.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

const TECHNICAL_SKILLS: &[&str] = &[
    "python",
    "java",
    "sql",
    "machine learning",
    "cloud",
    "nlp",
    "data analysis",
    "javascript",
    "react",
    "node.js",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "pytorch",
    "tensorflow",
    "scikit-learn",
    "pandas",
    "numpy",
    "c++",
    "c#",
    "ruby",
    "go",
    "rust",
    "r",
    "swift",
    "kotlin",
    "tableau",
    "power bi",
];

const SOFT_SKILLS: &[&str] = &[
    "communication",
    "teamwork",
    "leadership",
    "problem solving",
    "collaboration",
    "interpersonal",
    "adaptability",
    "critical thinking",
    "time management",
    "creativity",
    "emotional intelligence",
    "conflict resolution",
];

const SENIOR_KEYWORDS: &[&str] = &[
    "senior",
    "lead",
    "manager",
    "architect",
    "principal",
    "head",
    "director",
    "vp",
];

const MID_KEYWORDS: &[&str] = &["mid-level", "associate", "intermediate", "experienced", "mid"];

const JUNIOR_KEYWORDS: &[&str] = &[
    "junior",
    "entry-level",
    "fresher",
    "trainee",
    "graduate",
    "intern",
];

/// Immutable keyword configuration. All entries are lowercase, trimmed and deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub senior_keywords: Vec<String>,
    pub mid_keywords: Vec<String>,
    pub junior_keywords: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            technical_skills: owned(TECHNICAL_SKILLS),
            soft_skills: owned(SOFT_SKILLS),
            senior_keywords: owned(SENIOR_KEYWORDS),
            mid_keywords: owned(MID_KEYWORDS),
            junior_keywords: owned(JUNIOR_KEYWORDS),
        }
    }
}

impl Vocabulary {
    /// Reads a vocabulary override from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vocabulary file {}", path.display()))?;
        let vocabulary = Self::from_json(&raw)
            .with_context(|| format!("Invalid vocabulary file {}", path.display()))?;
        info!(
            "Loaded vocabulary from {}: {} technical, {} soft",
            path.display(),
            vocabulary.technical_skills.len(),
            vocabulary.soft_skills.len()
        );
        Ok(vocabulary)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let vocabulary: Vocabulary = serde_json::from_str(raw)?;
        Ok(vocabulary.normalized())
    }

    /// Lowercases, trims and deduplicates every list, dropping empty keywords.
    /// An empty keyword would match every text.
    pub fn normalized(self) -> Self {
        Self {
            technical_skills: normalize_list(self.technical_skills),
            soft_skills: normalize_list(self.soft_skills),
            senior_keywords: normalize_list(self.senior_keywords),
            mid_keywords: normalize_list(self.mid_keywords),
            junior_keywords: normalize_list(self.junior_keywords),
        }
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn normalize_list(words: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(words.len());
    for word in words {
        let word = word.trim().to_lowercase();
        if !word.is_empty() && !out.contains(&word) {
            out.push(word);
        }
    }
    out
}
