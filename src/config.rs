use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub label_service: LabelServiceConfig,

    pub reasoning: ReasoningConfig,

    pub cache: CacheConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Emit logs as JSON lines instead of the human-readable format.
    pub json_logs: bool,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/medguide.db".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

/// openFDA drug label API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelServiceConfig {
    pub base_url: String,

    pub api_key: Option<String>,

    /// Result limit for the initial brand/generic lookup.
    pub name_limit: u32,

    /// Result limit for the lookup by resolved generic name.
    pub generic_limit: u32,

    pub request_timeout_seconds: u64,
}

impl Default for LabelServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.fda.gov".to_string(),
            api_key: None,
            name_limit: constants::labels::NAME_SEARCH_LIMIT,
            generic_limit: constants::labels::GENERIC_SEARCH_LIMIT,
            request_timeout_seconds: 30,
        }
    }
}

/// OpenAI-compatible chat completion endpoint (Groq by default).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasoningConfig {
    pub base_url: String,

    pub api_key: Option<String>,

    pub model: String,

    pub request_timeout_seconds: u64,

    /// Upper bound on the raw label JSON embedded in summary prompts.
    pub max_label_chars: usize,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key: None,
            model: "openai/gpt-oss-120b".to_string(),
            request_timeout_seconds: 60,
            max_label_chars: constants::summary::MAX_LABEL_CHARS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_days: i64,

    pub purge_enabled: bool,

    pub purge_interval_minutes: u32,

    pub purge_cron: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_days: constants::cache::DEFAULT_TTL_DAYS,
            purge_enabled: true,
            purge_interval_minutes: constants::cache::DEFAULT_PURGE_INTERVAL_MINUTES,
            purge_cron: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            label_service: LabelServiceConfig::default(),
            reasoning: ReasoningConfig::default(),
            cache: CacheConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    /// Loads the first config file found, then applies `.env` and environment overrides.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let paths = Self::config_paths();

        let mut config = None;
        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                config = Some(Self::load_from_path(path)?);
                break;
            }
        }

        let mut config = config.unwrap_or_else(|| {
            info!("No config file found, using defaults");
            Self::default()
        });
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Environment variables win over file values. Blank values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(key) = get("FDA_API_KEY") {
            self.label_service.api_key = Some(key);
        }
        if let Some(key) = get("GROQ_API_KEY") {
            self.reasoning.api_key = Some(key);
        }
        if let Some(url) = get("DATABASE_URL") {
            self.general.database_path = url;
        }
        if let Some(port) = get("PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(level) = get("MEDGUIDE_LOG") {
            self.general.log_level = level;
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("medguide").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".medguide").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.label_service.base_url.trim().is_empty() {
            anyhow::bail!("label_service.base_url cannot be empty");
        }

        if self.reasoning.base_url.trim().is_empty() {
            anyhow::bail!("reasoning.base_url cannot be empty");
        }

        if self.label_service.name_limit == 0 || self.label_service.generic_limit == 0 {
            anyhow::bail!("label_service limits must be > 0");
        }

        if self.cache.ttl_days <= 0 {
            anyhow::bail!("cache.ttl_days must be > 0");
        }

        if self.cache.purge_enabled
            && self.cache.purge_interval_minutes == 0
            && self.cache.purge_cron.is_none()
        {
            anyhow::bail!("Cache purge interval must be > 0 or purge_cron must be set");
        }

        Ok(())
    }

    #[must_use]
    pub fn cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.cache.ttl_days)
    }
}
