//! Configuration for the question generation service

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExamForgeConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Completion engine configuration
    #[serde(default)]
    pub engines: EnginesConfig,
}

impl ExamForgeConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Default configuration with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// API keys come from the environment when set, so they never need to
    /// live in a config file
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("EXAMFORGE_GEMINI_API_KEY") {
            self.engines.gemini.api_key = key;
        }
        if let Ok(key) = std::env::var("EXAMFORGE_HF_API_KEY") {
            self.engines.huggingface.api_key = key;
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number
    #[serde(default = "default_port")]
    pub port: u16,
    /// Enable CORS
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 50MB)
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: default_enable_cors(),
            max_upload_size: default_max_upload_size(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_enable_cors() -> bool {
    true
}
fn default_max_upload_size() -> usize {
    50 * 1024 * 1024
}

/// Completion engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnginesConfig {
    /// Timeout for each engine call in seconds; expiry counts as an engine
    /// failure like any other
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Primary engine (Gemini)
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Secondary engine (Hugging Face)
    #[serde(default)]
    pub huggingface: HuggingFaceConfig,
}

impl EnginesConfig {
    /// Per-call request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for EnginesConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            gemini: GeminiConfig::default(),
            huggingface: HuggingFaceConfig::default(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    60
}

/// Gemini engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key (usually set via EXAMFORGE_GEMINI_API_KEY)
    #[serde(default)]
    pub api_key: String,
    /// API base URL
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    /// Model name
    #[serde(default = "default_gemini_model")]
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
        }
    }
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}
fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

/// Hugging Face engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuggingFaceConfig {
    /// API key (usually set via EXAMFORGE_HF_API_KEY)
    #[serde(default)]
    pub api_key: String,
    /// Inference API base URL
    #[serde(default = "default_hf_base_url")]
    pub base_url: String,
    /// Model name
    #[serde(default = "default_hf_model")]
    pub model: String,
    /// Completion length cap
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_hf_base_url(),
            model: default_hf_model(),
            max_new_tokens: default_max_new_tokens(),
        }
    }
}

fn default_hf_base_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}
fn default_hf_model() -> String {
    "mistralai/Mistral-7B-Instruct-v0.3".to_string()
}
fn default_max_new_tokens() -> u32 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = ExamForgeConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.engines.timeout_secs, 60);
        assert!(config.engines.gemini.base_url.starts_with("https://"));
        assert_eq!(config.engines.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: ExamForgeConfig = toml::from_str(
            r#"
            [server]
            port = 9000

            [engines.gemini]
            model = "gemini-2.0-flash"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.engines.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.engines.huggingface.max_new_tokens, 500);
    }
}
