use std::str::FromStr;

use anyhow::{bail, Context, Result};
use uuid::Uuid;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Fixed pseudo-identity every request acts as until real auth exists.
    pub owner_id: Uuid,
    pub question_count: usize,
    pub condensed_resume_word_cap: usize,
    pub llm_timeout_secs: u64,
    /// Upper bound on one uploaded answer recording.
    pub max_recording_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            owner_id: parse_env("OWNER_ID", Uuid::nil())?,
            question_count: parse_positive("QUESTION_COUNT", 5)?,
            condensed_resume_word_cap: parse_positive("CONDENSED_RESUME_WORD_CAP", 3000)?,
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            max_recording_bytes: parse_positive("MAX_RECORDING_BYTES", 25 * 1024 * 1024)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

/// Like `parse_env`, but zero is rejected.
fn parse_positive(key: &str, default: usize) -> Result<usize> {
    let value = parse_env(key, default)?;
    if value == 0 {
        bail!("Environment variable '{key}' must be greater than zero");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: usize = parse_env("INTERVIEW_COACH_TEST_UNSET_VAR", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("INTERVIEW_COACH_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = parse_env("INTERVIEW_COACH_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_env_reads_uuid() {
        std::env::set_var(
            "INTERVIEW_COACH_TEST_OWNER",
            "6f1c2a0e-8d4b-4c55-9a41-2f0b8c9d1e23",
        );
        let owner: Uuid = parse_env("INTERVIEW_COACH_TEST_OWNER", Uuid::nil()).unwrap();
        assert_ne!(owner, Uuid::nil());
    }

    #[test]
    fn test_parse_positive_rejects_zero() {
        std::env::set_var("INTERVIEW_COACH_TEST_ZERO_CAP", "0");
        let err = parse_positive("INTERVIEW_COACH_TEST_ZERO_CAP", 3000).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_parse_positive_accepts_default_and_value() {
        assert_eq!(parse_positive("INTERVIEW_COACH_TEST_UNSET_COUNT", 5).unwrap(), 5);
        std::env::set_var("INTERVIEW_COACH_TEST_COUNT", "3");
        assert_eq!(parse_positive("INTERVIEW_COACH_TEST_COUNT", 5).unwrap(), 3);
    }
}
