use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Which `ResultStore` implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    File,
    Memory,
}

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub data_file: PathBuf,
    pub store_backend: StoreBackend,
    /// Enables the LLM insight backend when set.
    pub anthropic_api_key: Option<String>,
    pub insight_timeout: Duration,
    pub vocabulary_file: Option<PathBuf>,
    pub remove_urls: bool,
    pub remove_emails: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: non_empty("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: non_empty("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            data_file: non_empty("DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/job_descriptions.json")),
            store_backend: match non_empty("STORE_BACKEND").as_deref() {
                None | Some("file") => StoreBackend::File,
                Some("memory") => StoreBackend::Memory,
                Some(other) => bail!("STORE_BACKEND must be 'file' or 'memory', got '{other}'"),
            },
            anthropic_api_key: non_empty("ANTHROPIC_API_KEY"),
            insight_timeout: parse_timeout(non_empty("INSIGHT_TIMEOUT_SECS"))?,
            vocabulary_file: non_empty("VOCABULARY_FILE").map(PathBuf::from),
            remove_urls: parse_flag("CLEAN_REMOVE_URLS", non_empty("CLEAN_REMOVE_URLS"))?,
            remove_emails: parse_flag("CLEAN_REMOVE_EMAILS", non_empty("CLEAN_REMOVE_EMAILS"))?,
        })
    }
}

/// Defaults to 30 seconds. Zero is rejected: it would turn every insight into the fallback.
fn parse_timeout(value: Option<String>) -> Result<Duration> {
    let secs = value
        .unwrap_or_else(|| "30".to_string())
        .trim()
        .parse::<u64>()
        .context("INSIGHT_TIMEOUT_SECS must be a whole number of seconds")?;
    if secs == 0 {
        bail!("INSIGHT_TIMEOUT_SECS must be at least 1");
    }
    Ok(Duration::from_secs(secs))
}

/// Absent flags default to on.
fn parse_flag(key: &str, value: Option<String>) -> Result<bool> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None => Ok(true),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => bail!("{key} must be a boolean, got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.data_file, PathBuf::from("data/job_descriptions.json"));
        assert_eq!(config.store_backend, StoreBackend::File);
        assert!(config.anthropic_api_key.is_none());
        assert_eq!(config.insight_timeout, Duration::from_secs(30));
        assert!(config.vocabulary_file.is_none());
        assert!(config.remove_urls);
        assert!(config.remove_emails);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("DATA_FILE", "/tmp/results.json"),
            ("STORE_BACKEND", "memory"),
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("INSIGHT_TIMEOUT_SECS", "5"),
            ("VOCABULARY_FILE", "vocab.json"),
            ("CLEAN_REMOVE_URLS", "false"),
            ("CLEAN_REMOVE_EMAILS", "0"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.data_file, PathBuf::from("/tmp/results.json"));
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.anthropic_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.insight_timeout, Duration::from_secs(5));
        assert_eq!(config.vocabulary_file, Some(PathBuf::from("vocab.json")));
        assert!(!config.remove_urls);
        assert!(!config.remove_emails);
    }

    #[test]
    fn test_blank_api_key_disables_backend() {
        let config = config_from(&[("ANTHROPIC_API_KEY", "   ")]).unwrap();
        assert!(config.anthropic_api_key.is_none());
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("STORE_BACKEND", "postgres")]).is_err());
        assert!(config_from(&[("INSIGHT_TIMEOUT_SECS", "-1")]).is_err());
        assert!(config_from(&[("INSIGHT_TIMEOUT_SECS", "0")]).is_err());
        assert!(config_from(&[("CLEAN_REMOVE_URLS", "maybe")]).is_err());
    }

    #[test]
    fn test_zero_insight_timeout_is_rejected() {
        let err = config_from(&[("INSIGHT_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(err.to_string().contains("at least 1"), "{err}");
        assert_eq!(
            config_from(&[("INSIGHT_TIMEOUT_SECS", "1")]).unwrap().insight_timeout,
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_parse_flag_accepts_common_spellings() {
        assert!(parse_flag("X", Some("YES".to_string())).unwrap());
        assert!(parse_flag("X", Some(" on ".to_string())).unwrap());
        assert!(!parse_flag("X", Some("Off".to_string())).unwrap());
    }
}
