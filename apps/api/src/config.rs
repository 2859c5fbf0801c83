use std::time::Duration;

use anyhow::{Context, Result};

use crate::interview::session::{SessionConfig, DEFAULT_TOPIC};
use crate::llm_client::{DEFAULT_API_URL, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub ai_model: String,
    pub ai_api_url: String,
    pub ai_timeout: Duration,
    /// Defaults for new interviews; each request may override them.
    pub interview: SessionConfig,
    pub port: u16,
    /// Idle time after which an interview is dropped from memory.
    pub session_ttl: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = SessionConfig::default();
        let interview = SessionConfig {
            max_questions: optional_env("MAX_QUESTIONS")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_QUESTIONS must be a positive integer")?
                .unwrap_or(defaults.max_questions),
            difficulty_levels: optional_env("DIFFICULTY_LEVELS")
                .map(|v| parse_difficulty_levels(&v))
                .unwrap_or(defaults.difficulty_levels),
            topic: optional_env("INTERVIEW_TOPIC").unwrap_or_else(|| DEFAULT_TOPIC.to_string()),
        };
        interview
            .validate()
            .context("Invalid interview defaults in environment")?;

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            ai_model: optional_env("AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            ai_api_url: optional_env("AI_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            ai_timeout: Duration::from_secs(
                optional_env("AI_TIMEOUT_SECS")
                    .map(|v| v.parse::<u64>())
                    .transpose()
                    .context("AI_TIMEOUT_SECS must be a whole number of seconds")?
                    .unwrap_or(120),
            ),
            interview,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            session_ttl: parse_session_ttl(optional_env("SESSION_TTL_SECS").as_deref())?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Idle TTL in seconds; defaults to one hour. Zero is rejected.
pub fn parse_session_ttl(raw: Option<&str>) -> Result<Duration> {
    let secs = match raw {
        Some(v) => v
            .parse::<u64>()
            .context("SESSION_TTL_SECS must be a whole number of seconds")?,
        None => 3600,
    };
    if secs == 0 {
        anyhow::bail!("SESSION_TTL_SECS must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

/// Splits a comma-separated list, trimming entries and dropping blanks.
pub fn parse_difficulty_levels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_difficulty_levels_trims_and_skips_blanks() {
        assert_eq!(
            parse_difficulty_levels(" easy, medium ,,hard "),
            vec!["easy", "medium", "hard"]
        );
    }

    #[test]
    fn test_parse_difficulty_levels_empty() {
        assert!(parse_difficulty_levels(" , ").is_empty());
    }

    #[test]
    fn test_parse_session_ttl() {
        assert_eq!(parse_session_ttl(None).unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_session_ttl(Some("90")).unwrap(), Duration::from_secs(90));
        assert!(parse_session_ttl(Some("0")).is_err());
        assert!(parse_session_ttl(Some("soon")).is_err());
    }
}
