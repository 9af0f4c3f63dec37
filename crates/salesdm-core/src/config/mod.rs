//! Configuration management

pub mod rate_limit;

pub use rate_limit::RateLimit;

use crate::error::{Result, SalesDmError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of products returned by retrieval
pub const DEFAULT_TOP_K: usize = 5;

/// Default upper bound (in characters) of the prompt context block
pub const DEFAULT_MAX_CONTEXT_LENGTH: usize = 2000;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// LLM service configuration
    #[serde(default)]
    pub llm: LLMServiceConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Retrieval tuning
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Log verbosity (tracing filter directive or level name)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// SQLite catalog location
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LLMServiceConfig::default(),
            server: ServerConfig::default(),
            retrieval: RetrievalConfig::default(),
            log_level: default_log_level(),
            database_path: default_database_path(),
        }
    }
}

/// External LLM endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMServiceConfig {
    /// Full URL the prompt is POSTed to
    #[serde(default = "default_llm_url")]
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for LLMServiceConfig {
    fn default() -> Self {
        Self {
            url: default_llm_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Allowed CORS origins; empty means any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Rate limit expression applied per client, e.g. `10/minute`
    #[serde(default = "default_rate_limit")]
    pub rate_limit: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            allowed_origins: Vec::new(),
            rate_limit: default_rate_limit(),
        }
    }
}

impl ServerConfig {
    /// Parse the configured rate limit expression
    pub fn parsed_rate_limit(&self) -> Result<RateLimit> {
        self.rate_limit.parse()
    }
}

/// Retrieval tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Maximum number of products per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Maximum context block length in characters
    #[serde(default = "default_max_context_length")]
    pub max_context_length: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            max_context_length: DEFAULT_MAX_CONTEXT_LENGTH,
        }
    }
}

fn default_llm_url() -> String {
    "https://apifreellm.com/api/chat".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_rate_limit() -> String {
    "10/minute".to_string()
}

fn default_log_level() -> String {
    "INFO".to_string()
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_max_context_length() -> usize {
    DEFAULT_MAX_CONTEXT_LENGTH
}

fn default_database_path() -> PathBuf {
    crate::db::Database::default_path()
}

impl Config {
    /// Load config from the default path, then apply environment overrides
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load config from `path` if it exists, then apply environment overrides
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_yaml::from_str(&content)?
        } else {
            Config::default()
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }

    /// Override fields from environment variables.
    ///
    /// `lookup` is injected so callers (and tests) control the source.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("LLM_API_URL") {
            self.llm.url = url;
        }
        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            self.server.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(limit) = lookup("RATE_LIMIT") {
            self.server.rate_limit = limit;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(path) = lookup("SALESDM_DB") {
            self.database_path = PathBuf::from(path);
        }
        if let Some(bind) = lookup("SALESDM_BIND") {
            self.server.bind_addr = bind;
        }
    }

    /// Reject settings that would break retrieval or serving
    pub fn validate(&self) -> Result<()> {
        if self.retrieval.top_k == 0 {
            return Err(SalesDmError::Config("retrieval.top_k must be > 0".into()));
        }
        let min_context = crate::search::NO_PRODUCTS_FOUND.chars().count();
        if self.retrieval.max_context_length < min_context {
            return Err(SalesDmError::Config(format!(
                "retrieval.max_context_length must be at least {}",
                min_context
            )));
        }
        if self.llm.timeout_secs == 0 {
            return Err(SalesDmError::Config("llm.timeout_secs must be > 0".into()));
        }
        self.server.parsed_rate_limit()?;
        Ok(())
    }

    /// Tracing filter directive derived from `log_level`
    pub fn log_filter(&self) -> String {
        self.log_level.to_lowercase()
    }
}
