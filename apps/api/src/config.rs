use anyhow::{bail, Context, Result};

use crate::screening::pipeline::FailurePolicy;

const DEFAULT_MAIL_API_URL: &str = "http://localhost:8025/api/v1/send";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Number of resume analyses allowed in flight at once. 1 keeps Pass 1 sequential.
    pub analysis_concurrency: usize,
    pub failure_policy: FailurePolicy,
    pub mail_api_url: String,
    /// Notification credentials. Only required when a rejection email is actually sent.
    pub email_user: Option<String>,
    pub email_pass: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let analysis_concurrency = std::env::var("ANALYSIS_CONCURRENCY")
            .unwrap_or_else(|_| "1".to_string())
            .parse::<usize>()
            .context("ANALYSIS_CONCURRENCY must be a positive integer")?;
        if analysis_concurrency == 0 {
            bail!("ANALYSIS_CONCURRENCY must be at least 1");
        }

        let failure_policy = std::env::var("ANALYSIS_FAILURE_POLICY")
            .unwrap_or_else(|_| "abort".to_string())
            .parse::<FailurePolicy>()
            .context("ANALYSIS_FAILURE_POLICY must be 'abort' or 'isolate'")?;

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            analysis_concurrency,
            failure_policy,
            mail_api_url: std::env::var("MAIL_API_URL")
                .unwrap_or_else(|_| DEFAULT_MAIL_API_URL.to_string()),
            email_user: optional_env("EMAIL_USER"),
            email_pass: optional_env("EMAIL_PASS"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
