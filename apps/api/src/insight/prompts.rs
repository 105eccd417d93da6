// Prompt text for insight generation.

/// System prompt for the insight backend.
pub const INSIGHT_SYSTEM: &str = "You are an AI assistant specialized in analyzing job descriptions. \
    Reply with a concise professional summary of the role in two or three sentences. \
    Do NOT use markdown, bullet points, or headings.";

/// Insight prompt template. Replace `{experience_level}`, `{technical_skills}`,
/// `{soft_skills}` and `{job_description}` before sending.
pub const INSIGHT_PROMPT_TEMPLATE: &str = "Analyze the following {experience_level} role requiring skills: \
{technical_skills} and {soft_skills}. Job description: {job_description}...\n\nProfessional Summary:";

/// Only this many characters of the cleaned text go into the prompt.
pub const MAX_PROMPT_TEXT_CHARS: usize = 500;
