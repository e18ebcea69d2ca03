//! Configuration loading for the OKX helper service
//!
//! Settings are layered: built-in defaults, then an optional JSON file, then
//! environment variables (a `.env` file is loaded by the binary first).

mod credentials;

pub use credentials::Credentials;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_OKX_BASE_URL: &str = "https://www.okx.com";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {key}: '{value}'")]
    InvalidEnv { key: &'static str, value: String },
}

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default = "default_app_version")]
    pub app_version: String,

    /// Verbose logging
    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub okx: OkxConfig,
}

fn default_app_name() -> String {
    "OKX API Helper".to_string()
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            app_version: default_app_version(),
            debug: false,
            server: ServerConfig::default(),
            okx: OkxConfig::default(),
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Exchange connection settings
#[derive(Clone, Serialize, Deserialize)]
pub struct OkxConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_secret: Option<String>,
    #[serde(default)]
    pub passphrase: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_OKX_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for OkxConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            api_secret: None,
            passphrase: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl OkxConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.base_url.clone(),
            self.api_key.clone(),
            self.api_secret.clone(),
            self.passphrase.clone(),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

impl std::fmt::Debug for OkxConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OkxConfig")
            .field("credentials", &self.credentials())
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults (or the given file) overlaid with the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_env(|key| std::env::var(key).ok())
    }

    /// Overlay values from an environment lookup. Empty values are ignored.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("APP_NAME") {
            self.app_name = v;
        }
        if let Some(v) = get("APP_VERSION") {
            self.app_version = v;
        }
        if let Some(v) = get("DEBUG") {
            self.debug = parse_bool("DEBUG", &v)?;
        }
        if let Some(v) = get("HOST") {
            self.server.host = v;
        }
        if let Some(v) = get("PORT") {
            self.server.port = v.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                key: "PORT",
                value: v.clone(),
            })?;
        }
        if let Some(v) = get("OKX_BASE_URL") {
            self.okx.base_url = v;
        }
        if let Some(v) = get("OKX_API_KEY") {
            self.okx.api_key = Some(v);
        }
        if let Some(v) = get("OKX_API_SECRET") {
            self.okx.api_secret = Some(v);
        }
        if let Some(v) = get("OKX_PASSPHRASE") {
            self.okx.passphrase = Some(v);
        }
        if let Some(v) = get("OKX_REQUEST_TIMEOUT_SECS") {
            self.okx.request_timeout_secs =
                v.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    key: "OKX_REQUEST_TIMEOUT_SECS",
                    value: v.clone(),
                })?;
        }

        Ok(self)
    }

    /// `host:port` to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config.app_name, "OKX API Helper");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.okx.base_url, DEFAULT_OKX_BASE_URL);
        assert_eq!(config.okx.request_timeout_secs, 30);
        assert!(!config.debug);
        assert!(config.okx.api_key.is_none());
    }

    #[test]
    fn test_parse_file_sections() {
        let json = r#"{
            "debug": true,
            "server": { "port": 9100 },
            "okx": { "api_key": "k", "request_timeout_secs": 5 }
        }"#;
        let config = AppConfig::from_json(json).unwrap();
        assert!(config.debug);
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.okx.api_key.as_deref(), Some("k"));
        assert_eq!(config.okx.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_env_overrides_file() {
        let config = AppConfig::from_json(r#"{"server": {"port": 9100}}"#)
            .unwrap()
            .with_env(env(&[
                ("PORT", "9200"),
                ("DEBUG", "true"),
                ("OKX_API_KEY", "env-key"),
                ("OKX_API_SECRET", "env-secret"),
                ("OKX_PASSPHRASE", "env-pass"),
                ("OKX_BASE_URL", "https://example.test/"),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 9200);
        assert!(config.debug);
        assert_eq!(config.bind_addr(), "0.0.0.0:9200");

        let creds = config.okx.credentials();
        assert!(creds.status().is_complete());
        assert_eq!(creds.base_url(), "https://example.test");
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let config = AppConfig::default()
            .with_env(env(&[("OKX_API_SECRET", ""), ("PORT", "  ")]))
            .unwrap();
        assert!(config.okx.api_secret.is_none());
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_invalid_env_values() {
        let err = AppConfig::default()
            .with_env(env(&[("PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { key: "PORT", .. }));

        let err = AppConfig::default()
            .with_env(env(&[("DEBUG", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { key: "DEBUG", .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::from_file("/nonexistent/okx-helper.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_debug_output_hides_secret() {
        let config = AppConfig::default()
            .with_env(env(&[("OKX_API_SECRET", "s3cr3t")]))
            .unwrap();
        assert!(!format!("{:?}", config).contains("s3cr3t"));
    }
}
