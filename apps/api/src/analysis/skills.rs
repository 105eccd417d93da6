use std::collections::BTreeSet;

use crate::analysis::vocabulary::Vocabulary;
use crate::models::analysis::SkillSet;

/// Collects every vocabulary keyword that appears in `text`.
///
/// Matching is a plain case-insensitive substring test, not word-boundary aware:
/// "go" matches inside "going" and "r" matches nearly any text.
pub fn extract_skills(text: &str, vocabulary: &Vocabulary) -> SkillSet {
    let text = text.to_lowercase();
    SkillSet {
        technical_skills: matching(&text, &vocabulary.technical_skills),
        soft_skills: matching(&text, &vocabulary.soft_skills),
    }
}

fn matching(text: &str, keywords: &[String]) -> BTreeSet<String> {
    keywords
        .iter()
        .filter(|kw| text.contains(kw.as_str()))
        .cloned()
        .collect()
}
