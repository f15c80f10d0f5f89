use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::{gemini, BackendPolicy};

/// Application configuration loaded from environment variables.
/// Every variable has a default; the Gemini API key is never read from here,
/// it arrives with each request.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_base_url: String,
    pub gemini_model: String,
    /// `None` disables the per-call timeout.
    pub backend_timeout: Option<Duration>,
    pub backend_max_retries: u32,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_base_url: env_or("GEMINI_API_BASE_URL", gemini::DEFAULT_BASE_URL),
            gemini_model: env_or("GEMINI_MODEL", gemini::DEFAULT_MODEL),
            backend_timeout: timeout_from_secs(parse_env("BACKEND_TIMEOUT_SECS", 120u64)?),
            backend_max_retries: parse_env("BACKEND_MAX_RETRIES", 0u32)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_MB", 10usize)? * 1024 * 1024,
            port: parse_env("PORT", 8080u16).context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    pub fn backend_policy(&self) -> BackendPolicy {
        BackendPolicy {
            timeout: self.backend_timeout,
            max_retries: self.backend_max_retries,
            ..BackendPolicy::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let policy = BackendPolicy::default();
        Config {
            gemini_base_url: gemini::DEFAULT_BASE_URL.to_string(),
            gemini_model: gemini::DEFAULT_MODEL.to_string(),
            backend_timeout: policy.timeout,
            backend_max_retries: policy.max_retries,
            max_upload_bytes: 10 * 1024 * 1024,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => parse_value(key, &raw),
        _ => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'"))
}

fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
