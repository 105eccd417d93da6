use tracing::debug;

use crate::analysis::vocabulary::Vocabulary;
use crate::models::analysis::ExperienceLevel;

/// Number of distinct keywords from each tier found in a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierCounts {
    pub senior: usize,
    pub mid: usize,
    pub junior: usize,
}

impl TierCounts {
    /// Strict priority, not highest count: Senior > Mid-level > Junior.
    /// No match at all falls back to Mid-level.
    pub fn level(&self) -> ExperienceLevel {
        if self.senior > 0 {
            ExperienceLevel::Senior
        } else if self.mid > 0 {
            ExperienceLevel::MidLevel
        } else if self.junior > 0 {
            ExperienceLevel::Junior
        } else {
            ExperienceLevel::MidLevel
        }
    }
}

pub fn count_tiers(text: &str, vocabulary: &Vocabulary) -> TierCounts {
    let text = text.to_lowercase();
    let count = |keywords: &[String]| {
        keywords
            .iter()
            .filter(|kw| text.contains(kw.as_str()))
            .count()
    };
    TierCounts {
        senior: count(&vocabulary.senior_keywords),
        mid: count(&vocabulary.mid_keywords),
        junior: count(&vocabulary.junior_keywords),
    }
}

/// Assigns exactly one experience level to `text`.
pub fn classify_experience(text: &str, vocabulary: &Vocabulary) -> ExperienceLevel {
    let counts = count_tiers(text, vocabulary);
    let level = counts.level();
    debug!(
        senior = counts.senior,
        mid = counts.mid,
        junior = counts.junior,
        %level,
        "Experience tiers counted"
    );
    level
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> ExperienceLevel {
        classify_experience(text, &Vocabulary::default())
    }

    #[test]
    fn test_senior_wins_over_junior() {
        assert_eq!(
            classify("senior engineer mentoring junior developers"),
            ExperienceLevel::Senior
        );
    }

    #[test]
    fn test_senior_wins_even_when_outnumbered() {
        let counts = count_tiers(
            "lead role. junior, trainee, graduate and intern candidates welcome",
            &Vocabulary::default(),
        );
        assert_eq!(counts.senior, 1);
        assert_eq!(counts.junior, 4);
        assert_eq!(counts.level(), ExperienceLevel::Senior);
    }

    #[test]
    fn test_empty_text_defaults_to_mid_level() {
        assert_eq!(classify(""), ExperienceLevel::MidLevel);
    }

    #[test]
    fn test_no_keywords_defaults_to_mid_level() {
        assert_eq!(classify("data analyst for a retail company"), ExperienceLevel::MidLevel);
    }

    #[test]
    fn test_entry_level_is_junior() {
        assert_eq!(classify("entry-level analyst"), ExperienceLevel::Junior);
    }

    #[test]
    fn test_mid_beats_junior() {
        assert_eq!(
            classify("intermediate developer, graduate applicants considered"),
            ExperienceLevel::MidLevel
        );
    }

    #[test]
    fn test_substring_matching_applies_to_tiers() {
        // "head" inside "headquarters" counts as a senior keyword.
        assert_eq!(classify("junior role at our headquarters"), ExperienceLevel::Senior);
    }

    #[test]
    fn test_counts_are_per_keyword_not_per_occurrence() {
        let counts = count_tiers("junior junior junior", &Vocabulary::default());
        assert_eq!(counts, TierCounts { senior: 0, mid: 0, junior: 1 });
    }

    #[test]
    fn test_custom_vocabulary_tiers() {
        let vocabulary = Vocabulary {
            senior_keywords: vec!["staff".into()],
            mid_keywords: vec![],
            junior_keywords: vec!["apprentice".into()],
            ..Vocabulary::default()
        };
        assert_eq!(
            classify_experience("staff engineer", &vocabulary),
            ExperienceLevel::Senior
        );
        assert_eq!(
            classify_experience("apprentice welder", &vocabulary),
            ExperienceLevel::Junior
        );
        assert_eq!(
            classify_experience("senior engineer", &vocabulary),
            ExperienceLevel::MidLevel
        );
    }
}
