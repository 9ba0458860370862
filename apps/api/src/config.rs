use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Which caption backend serves generation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    OpenAi,
    Mock,
}

impl FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Backend::OpenAi),
            "mock" => Ok(Backend::Mock),
            other => bail!("CAPTION_BACKEND must be 'openai' or 'mock', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: Backend,
    /// Required for the openai backend only.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub mock_delay_ms: u64,
    /// Sessions idle longer than this are evicted.
    pub session_ttl_secs: u64,
    pub session_sweep_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let backend = lookup("CAPTION_BACKEND")
            .map(|v| v.parse::<Backend>())
            .transpose()?
            .unwrap_or(Backend::OpenAi);

        let openai_api_key = lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty());
        if backend == Backend::OpenAi && openai_api_key.is_none() {
            bail!("Required environment variable 'OPENAI_API_KEY' is not set");
        }

        let session_ttl_secs = lookup("SESSION_TTL_SECS")
            .unwrap_or_else(|| "3600".to_string())
            .parse::<u64>()
            .context("SESSION_TTL_SECS must be a number of seconds")?;
        let session_sweep_secs = lookup("SESSION_SWEEP_SECS")
            .unwrap_or_else(|| "60".to_string())
            .parse::<u64>()
            .context("SESSION_SWEEP_SECS must be a number of seconds")?;
        if session_sweep_secs == 0 {
            bail!("SESSION_SWEEP_SECS must be greater than zero");
        }

        Ok(Config {
            backend,
            openai_api_key,
            openai_base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            openai_model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            mock_delay_ms: lookup("MOCK_DELAY_MS")
                .unwrap_or_else(|| "2000".to_string())
                .parse::<u64>()
                .context("MOCK_DELAY_MS must be a number of milliseconds")?,
            session_ttl_secs,
            session_sweep_secs,
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
