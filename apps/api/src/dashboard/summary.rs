use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::models::analysis::{AnalysisResult, ExperienceLevel};

/// How many skills the top-skills chart shows.
pub const TOP_SKILLS_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelCount {
    pub level: ExperienceLevel,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillFrequency {
    pub skill: String,
    pub frequency: usize,
}

/// Aggregates over the whole analysis history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_analyzed: usize,
    pub unique_technical_skills: usize,
    pub senior_roles: usize,
    /// Count desc; ties in Junior, Mid-level, Senior order. Zero counts omitted.
    pub experience_breakdown: Vec<LevelCount>,
    /// Frequency desc; ties by skill name.
    pub top_technical_skills: Vec<SkillFrequency>,
}

pub fn summarize(results: &[AnalysisResult]) -> DashboardSummary {
    let mut levels: BTreeMap<ExperienceLevel, usize> = BTreeMap::new();
    let mut skills: HashMap<&str, usize> = HashMap::new();

    for result in results {
        *levels.entry(result.experience_level).or_default() += 1;
        for skill in &result.skills.technical_skills {
            *skills.entry(skill.as_str()).or_default() += 1;
        }
    }

    let mut experience_breakdown: Vec<LevelCount> = levels
        .into_iter()
        .map(|(level, count)| LevelCount { level, count })
        .collect();
    // Stable sort keeps the BTreeMap's level order for ties.
    experience_breakdown.sort_by_key(|lc| Reverse(lc.count));

    let unique_technical_skills = skills.len();
    let mut top_technical_skills: Vec<SkillFrequency> = skills
        .into_iter()
        .map(|(skill, frequency)| SkillFrequency {
            skill: skill.to_string(),
            frequency,
        })
        .collect();
    top_technical_skills.sort_by(|a, b| {
        b.frequency
            .cmp(&a.frequency)
            .then_with(|| a.skill.cmp(&b.skill))
    });
    top_technical_skills.truncate(TOP_SKILLS_LIMIT);

    DashboardSummary {
        total_analyzed: results.len(),
        unique_technical_skills,
        senior_roles: results
            .iter()
            .filter(|r| r.experience_level == ExperienceLevel::Senior)
            .count(),
        experience_breakdown,
        top_technical_skills,
    }
}

/// History newest first, filtered by a case-insensitive substring match over
/// the original text, the insight and the technical skills. The query is used
/// as typed (no trimming); an empty query keeps everything.
pub fn search_history<'a>(results: &'a [AnalysisResult], query: &str) -> Vec<&'a AnalysisResult> {
    let query = query.to_lowercase();
    results
        .iter()
        .rev()
        .filter(|r| searchable_text(r).contains(&query))
        .collect()
}

fn searchable_text(result: &AnalysisResult) -> String {
    let skills: Vec<&str> = result
        .skills
        .technical_skills
        .iter()
        .map(String::as_str)
        .collect();
    format!(
        "{} {} {}",
        result.original_text,
        result.insight,
        skills.join(" ")
    )
    .to_lowercase()
}
