use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::ReasoningService;
use crate::config::ReasoningConfig;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat completion API in JSON mode.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    base: String,
    api_key: Option<String>,
    model: String,
}

impl GroqClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &ReasoningConfig) -> Self {
        Self {
            client,
            base: config.base_url.clone(),
            api_key: config
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from),
            model: config.model.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base.trim_end_matches('/'))
    }
}

/// Parses the model's reply, tolerating a surrounding markdown code fence.
fn parse_json_reply(content: &str) -> Result<serde_json::Value> {
    let trimmed = content.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .unwrap_or(trimmed);

    let value: serde_json::Value =
        serde_json::from_str(unfenced.trim()).context("Reasoning reply is not valid JSON")?;

    if !value.is_object() {
        anyhow::bail!("Reasoning reply is not a JSON object");
    }
    Ok(value)
}

#[async_trait]
impl ReasoningService for GroqClient {
    async fn complete_json(&self, prompt: &str) -> Result<serde_json::Value> {
        let api_key = self
            .api_key
            .as_deref()
            .context("Reasoning service API key is not configured")?;

        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .context("Reasoning service request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Reasoning API error: {} - {}", status, body));
        }

        let response: ChatResponse = response
            .json()
            .await
            .context("Failed to decode chat completion")?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .context("Chat completion has no content")?;

        parse_json_reply(&content)
    }
}
