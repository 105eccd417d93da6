//! Text normalizer: turns raw job-description text into the lowercase,
//! punctuation-restricted form every keyword matcher reads.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"http[s]?://(?:[a-zA-Z]|[0-9]|[$-_@.\&+]|[!*\\(\\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+")
        .expect("URL pattern is valid")
});

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S*@\S*\s?").expect("email pattern is valid"));

/// Anything outside ASCII alphanumerics, whitespace and `. , ? ! ( ) -`.
static DISALLOWED_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s.,?!()\-]").expect("char class is valid"));

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Toggles for the optional removal passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanOptions {
    pub remove_urls: bool,
    pub remove_emails: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            remove_urls: true,
            remove_emails: true,
        }
    }
}

/// Normalizes `text`. Absent or empty input yields an empty string.
///
/// URL and email removal run before the character filter: both patterns need
/// `:`, `/` and `@`, which the filter deletes.
pub fn clean_text(text: Option<&str>, options: CleanOptions) -> String {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return String::new(),
    };

    let mut text = text.to_lowercase();

    if options.remove_urls {
        text = URL_PATTERN.replace_all(&text, "").into_owned();
    }
    if options.remove_emails {
        text = EMAIL_PATTERN.replace_all(&text, "").into_owned();
    }

    let text = DISALLOWED_CHARS.replace_all(&text, "");
    WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
}
