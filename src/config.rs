//! Service configuration

use serde::{Deserialize, Serialize};

use crate::error::{RecommendError, Result};

/// Top-level service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Recommendation engine settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Recommendation engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of recommendations per request when the caller does not ask
    #[serde(default = "default_count")]
    pub default_count: usize,

    /// Upper bound on the per-request recommendation count
    #[serde(default = "default_max_count")]
    pub max_count: usize,

    /// Recency decay constant in days
    #[serde(default = "default_recency_decay_days")]
    pub recency_decay_days: f64,

    /// Per-user interaction history bound
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_count() -> usize {
    5
}

fn default_max_count() -> usize {
    50
}

fn default_recency_decay_days() -> f64 {
    30.0
}

fn default_history_limit() -> usize {
    100
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_count: default_count(),
            max_count: default_max_count(),
            recency_decay_days: default_recency_decay_days(),
            history_limit: default_history_limit(),
        }
    }
}

/// Catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Seed the in-memory catalog with demo content at startup
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
}

fn default_seed_demo_data() -> bool {
    true
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: default_seed_demo_data(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit logs as JSON
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Config {
    /// Load configuration from an optional `config.toml` layered with
    /// `EMOREC_`-prefixed environment variables
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("EMOREC").separator("__"))
            .build()
            .map_err(|e| RecommendError::Configuration(e.to_string()))?;

        let cfg: Config = settings
            .try_deserialize()
            .map_err(|e| RecommendError::Configuration(e.to_string()))?;

        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate that the configuration is internally consistent
    pub fn validate(&self) -> Result<()> {
        if self.engine.default_count == 0 {
            return Err(RecommendError::Configuration(
                "engine.default_count must be at least 1".to_string(),
            ));
        }
        if self.engine.max_count < self.engine.default_count {
            return Err(RecommendError::Configuration(format!(
                "engine.max_count {} below engine.default_count {}",
                self.engine.max_count, self.engine.default_count
            )));
        }
        if self.engine.recency_decay_days <= 0.0 {
            return Err(RecommendError::Configuration(
                "engine.recency_decay_days must be positive".to_string(),
            ));
        }
        if self.engine.history_limit == 0 {
            return Err(RecommendError::Configuration(
                "engine.history_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
