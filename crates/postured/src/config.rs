//! Configuration management for postured.
//!
//! Loads settings from /etc/postured/config.toml or uses defaults. The
//! gateway credential is never read from the file, only from the
//! `POSTURED_API_KEY` environment variable.

use anyhow::Result;
use posture_common::llm_client::CompletionConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/postured/config.toml";

/// Environment variable carrying the gateway bearer credential
pub const API_KEY_ENV: &str = "POSTURED_API_KEY";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address for the analysis API
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Completion gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Gateway base URL, without the /v1/chat/completions suffix
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Outbound request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7861".to_string()
}

fn default_endpoint() -> String {
    "https://ai.gateway.lovable.dev".to_string()
}

fn default_model() -> String {
    "google/gemini-2.5-flash".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load from the default path, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    /// Load from a specific path, falling back to defaults when absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            info!("No config at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Build the completion client config, pulling the credential from the
    /// environment. A missing key is tolerated here and classified per call.
    pub fn completion_config(&self) -> CompletionConfig {
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            warn!(
                "{} is not set; analysis calls will fail until it is configured",
                API_KEY_ENV
            );
        }

        CompletionConfig {
            endpoint: self.gateway.endpoint.clone(),
            model: self.gateway.model.clone(),
            api_key,
            timeout_secs: self.gateway.timeout_secs,
        }
    }
}
