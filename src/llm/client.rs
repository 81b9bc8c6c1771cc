use crate::config::LlmConfig;
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

const SYSTEM_PROMPT: &str = "You are a meeting assistant. Answer concisely.";

/// Anything that turns a prompt into generated text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Model name for logging
    fn model(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Client for OpenAI-compatible `/chat/completions` endpoints
pub struct LlmClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        let url = format!("{}/chat/completions", config.api_base.trim_end_matches('/'));
        info!("LLM client configured: {} (model={})", url, config.model);

        Ok(Self {
            http,
            url,
            api_key: config.api_key.trim().to_string(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
            temperature: 0.3,
        };

        let res = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("LLM request failed")?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            bail!("LLM API error {}: {}", status, text);
        }

        let parsed: ChatResponse = res.json().await.context("Failed to parse LLM response")?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| anyhow!("LLM returned no content"))
    }

    fn model(&self) -> &str {
        &self.model
    }
}
