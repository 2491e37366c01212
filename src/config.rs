//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default backend base URL
pub const DEFAULT_API_URL: &str = "http://localhost:1960";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.normalize();
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("sourcebook").join("config.toml")),
            Some(PathBuf::from("./sourcebook.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("SOURCEBOOK_API_URL") {
            self.api.url = url;
        }
        if let Some(timeout) = lookup("SOURCEBOOK_API_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.api.request_timeout_secs = secs;
            }
        }

        if let Some(level) = lookup("SOURCEBOOK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("SOURCEBOOK_LOG_FORMAT") {
            self.logging.format = format;
        }

        self.normalize();
    }

    fn normalize(&mut self) {
        let trimmed = self.api.url.trim_end_matches('/').len();
        self.api.url.truncate(trimmed);
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Sourcebook Configuration
#
# Environment variables override these settings:
# - SOURCEBOOK_API_URL
# - SOURCEBOOK_API_TIMEOUT
# - SOURCEBOOK_LOG_LEVEL
# - SOURCEBOOK_LOG_FORMAT

[api]
# Backend base URL
url = "http://localhost:1960"

# Request timeout in seconds
request_timeout_secs = 30

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.url, "http://localhost:1960");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, generate_default_config()).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.url, DEFAULT_API_URL);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_file_and_trailing_slash() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nurl = \"https://cite.example.org/\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.url, "https://cite.example.org");
        assert_eq!(config.api.request_timeout_secs, 30);
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nurl = 3").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
        assert!(matches!(
            Config::load(&dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("SOURCEBOOK_API_URL", "http://backend:8000/"),
            ("SOURCEBOOK_API_TIMEOUT", "not-a-number"),
            ("SOURCEBOOK_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.url, "http://backend:8000");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");
    }
}
