pub mod groq;
pub mod openfda;

use async_trait::async_trait;

use crate::models::label::{LabelQuery, LabelRecord};

/// Source of drug label monographs.
#[async_trait]
pub trait LabelSource: Send + Sync {
    /// An empty list means the source had no matches.
    async fn search_labels(&self, query: &LabelQuery) -> anyhow::Result<Vec<LabelRecord>>;
}

/// A language model that answers a prompt with a single JSON object.
#[async_trait]
pub trait ReasoningService: Send + Sync {
    async fn complete_json(&self, prompt: &str) -> anyhow::Result<serde_json::Value>;
}

/// Build a shared HTTP client for outbound API calls.
pub fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(concat!("medguide/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}
