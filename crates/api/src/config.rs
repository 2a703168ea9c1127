//! Server Configuration

use crate::rate_limit::RateLimitConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration, loaded from an optional TOML file layered
/// under `DELIVERY_`-prefixed environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listen address
    pub bind_addr: String,
    /// Directory holding the model, feature schema, and category map
    pub artifact_dir: PathBuf,
    /// Rate limiting for the prediction endpoints
    pub rate_limit: RateLimitConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            artifact_dir: PathBuf::from("artifacts"),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration: `delivery-predictor.toml` if present, then
    /// environment overrides (e.g. `DELIVERY_BIND_ADDR`).
    pub fn load() -> Result<Self, ::config::ConfigError> {
        ::config::Config::builder()
            .add_source(::config::File::with_name("delivery-predictor").required(false))
            .add_source(::config::Environment::with_prefix("DELIVERY").separator("__"))
            .build()?
            .try_deserialize()
    }
}
