use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_API_VERSION: &str = "2023-06-01";
pub const DEFAULT_MAX_TOKENS: u32 = 1500;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5001";
pub const DEFAULT_STATIC_DIR: &str = "./static";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ANTHROPIC_API_KEY is not set")]
    MissingApiKey,

    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

/// Settings for the outbound model call.
#[derive(Clone)]
pub struct ProviderConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub api_version: String,
    pub max_tokens: u32,
    /// `None` leaves the request waiting on the provider indefinitely.
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_version", &self.api_version)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub static_dir: String,
    pub provider: ProviderConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let api_key = get("ANTHROPIC_API_KEY").ok_or(ConfigError::MissingApiKey)?;

        let max_tokens = match get("ANALYSIS_MAX_TOKENS") {
            Some(raw) => parse_positive("ANALYSIS_MAX_TOKENS", &raw)? as u32,
            None => DEFAULT_MAX_TOKENS,
        };
        let timeout = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(parse_positive("UPSTREAM_TIMEOUT_SECS", &raw)?)),
            None => None,
        };

        Ok(Self {
            bind_addr: or("BIND_ADDR", DEFAULT_BIND_ADDR),
            static_dir: or("STATIC_DIR", DEFAULT_STATIC_DIR),
            provider: ProviderConfig {
                api_url: or("ANTHROPIC_API_URL", DEFAULT_API_URL),
                api_key,
                model: or("ANTHROPIC_MODEL", DEFAULT_MODEL),
                api_version: or("ANTHROPIC_VERSION", DEFAULT_API_VERSION),
                max_tokens,
                timeout,
            },
        })
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 && n <= u32::MAX as u64 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            key,
            value: raw.to_string(),
        }),
    }
}
