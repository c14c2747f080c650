use serde::{Deserialize, Serialize};

/// Body of every error response and of plain acknowledgements.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogParams {
    pub letter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InteractionCheckRequest {
    #[serde(default)]
    pub drugs: Option<Vec<String>>,
}
