//! The model boundary: one trait, one hosted implementation.

use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::info;

use crate::media::MediaPayload;
use crate::schema::ExtractionSchema;

const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-001";
const DEFAULT_TIMEOUT_SECS: u64 = 90;
const MAX_TOKENS: u32 = 4000;

/// A collaborator that renders a prompt plus attached media to a multimodal
/// model and returns a schema-conformant structured object.
///
/// `Ok(None)` means the call itself succeeded but produced no structured
/// output; transport and upstream errors are `Err`.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn extract(
        &self,
        prompt: &str,
        media: &MediaPayload,
        schema: &ExtractionSchema,
    ) -> anyhow::Result<Option<Value>>;
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl ModelConfig {
    /// Read configuration from the environment: `OPENROUTER_API_KEY`
    /// (required), `DOCLENS_MODEL` and `DOCLENS_TIMEOUT_SECS` (optional).
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| anyhow!("OPENROUTER_API_KEY environment variable not set"))?;
        let model = std::env::var("DOCLENS_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout = std::env::var("DOCLENS_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        Ok(Self {
            api_key,
            model,
            timeout,
        })
    }
}

/// OpenRouter-backed model client: one chat-completions call per request,
/// vision content blocks carrying the data URI, structured output enforced
/// through `response_format`. No retry; the configured timeout bounds the
/// call.
pub struct OpenRouterClient {
    config: ModelConfig,
    client: Client,
}

impl OpenRouterClient {
    pub fn new(config: ModelConfig) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(ModelConfig::from_env()?)
    }
}

#[async_trait]
impl ModelClient for OpenRouterClient {
    async fn extract(
        &self,
        prompt: &str,
        media: &MediaPayload,
        schema: &ExtractionSchema,
    ) -> anyhow::Result<Option<Value>> {
        let payload = json!({
            "model": self.config.model,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": prompt },
                        { "type": "image_url", "image_url": { "url": media.as_uri() } }
                    ]
                }
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": schema.name,
                    "strict": true,
                    "schema": schema.to_json_schema(),
                }
            },
            "max_tokens": MAX_TOKENS,
        });

        info!(model = %self.config.model, schema = schema.name, "calling model");

        let response = self
            .client
            .post(OPENROUTER_URL)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("model API request failed: {}", response.status()));
        }

        let response_json: Value = response.json().await?;

        let content = match response_json["choices"][0]["message"]["content"].as_str() {
            Some(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => return Ok(None),
        };

        let structured: Value = serde_json::from_str(&content)
            .map_err(|e| anyhow!("model returned unparseable output: {}", e))?;

        Ok(Some(structured))
    }
}
