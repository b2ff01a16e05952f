use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding the inference service credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON5 parse error: {0}")]
    Json5(#[from] json5::Error),
    #[error("Config directory not found")]
    NoDirFound,
    #[error("{API_KEY_ENV} is not set; the inference service cannot be reached without it")]
    MissingApiKey,
}

/// Top-level vidsum configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VidsumConfig {
    /// Model ID to use for analysis and follow-up chat.
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the inference API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Advisory upload ceiling in bytes. Files above it are warned about,
    /// not rejected.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_max_upload_bytes() -> u64 {
    100 * 1024 * 1024
}

impl Default for VidsumConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            request_timeout_secs: default_timeout_secs(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// Resolve the vidsum config directory (~/.vidsum/).
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|h| h.join(".vidsum"))
        .ok_or(ConfigError::NoDirFound)
}

/// Resolve the config file path (~/.vidsum/config.json5).
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.json5"))
}

/// Load configuration from the default path, falling back to defaults.
pub fn load_config() -> Result<VidsumConfig, ConfigError> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let path = config_file_path()?;
    load_config_from(&path)
}

/// Load configuration from a specific path, falling back to defaults if not found.
pub fn load_config_from(path: &Path) -> Result<VidsumConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!("Config file not found at {}, using defaults", path.display());
        return Ok(VidsumConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: VidsumConfig = json5::from_str(&content)?;
    Ok(config)
}

/// Ensure the config directory exists.
pub fn ensure_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = config_dir()?;
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

/// Save configuration to the default path.
pub fn save_config(config: &VidsumConfig) -> Result<(), ConfigError> {
    let dir = ensure_config_dir()?;
    let path = dir.join("config.json5");
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| ConfigError::Io(std::io::Error::other(e)))?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Resolve the inference service credential from the environment.
///
/// A missing or empty credential is a fatal precondition for any remote
/// call and surfaces as [`ConfigError::MissingApiKey`].
pub fn resolve_api_key() -> Result<String, ConfigError> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ConfigError::MissingApiKey),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VidsumConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(config.base_url.starts_with("https://"));
        assert_eq!(config.request_timeout_secs, 120);
        assert_eq!(config.max_upload_bytes, 100 * 1024 * 1024);
    }

    #[test]
    fn test_json5_parse() {
        let json5_str = r#"{
            model: "gemini-2.5-pro",
            request_timeout_secs: 300,
        }"#;
        let config: VidsumConfig = json5::from_str(json5_str).unwrap();
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.request_timeout_secs, 300);
        // Unspecified fields keep their defaults
        assert_eq!(config.base_url, default_base_url());
        assert_eq!(config.max_upload_bytes, default_max_upload_bytes());
    }

    #[test]
    fn test_load_config_from_missing_file() {
        let config = load_config_from(Path::new("/nonexistent/vidsum/config.json5")).unwrap();
        assert_eq!(config.model, default_model());
    }

    #[test]
    fn test_missing_api_key_message_names_the_variable() {
        let err = ConfigError::MissingApiKey;
        assert!(err.to_string().contains(API_KEY_ENV));
    }
}
