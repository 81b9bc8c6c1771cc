use crate::session::SessionLimits;
use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub session: SessionLimits,
    #[serde(default)]
    pub upload: UploadConfig,
    /// Remote LLM used for meeting summaries; summaries fall back to
    /// placeholder text when absent
    #[serde(default)]
    pub llm: Option<LlmConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Largest accepted request body for audio/video uploads
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: 200 * 1024 * 1024,
        }
    }
}

/// Every field has a default, so `VISISEC__LLM__API_KEY` alone enables the
/// LLM without an `[llm]` table in the file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load from a TOML file, then apply `VISISEC__SECTION__KEY` overrides
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("VISISEC").separator("__"))
            .build()
            .with_context(|| format!("Failed to read config {}", path))?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }
}
