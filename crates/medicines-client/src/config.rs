//! Client configuration.
//!
//! Precedence, lowest to highest: built-in defaults, TOML file,
//! `MEDICINES_API_URL` environment variable, `--base-url` flag.

use std::path::{Path, PathBuf};

use medicines_core::notify::DEFAULT_NOTIFICATION_TTL_SECS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the API base URL.
pub const ENV_BASE_URL: &str = "MEDICINES_API_URL";

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid base URL '{0}': must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("notification_ttl_secs must be positive, got {0}")]
    InvalidTtl(i64),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for talking to the inventory API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Root URL of the inventory API, without trailing slash
    pub base_url: String,
    /// How long notifications stay visible
    pub notification_ttl_secs: i64,
    /// Ask before deleting
    pub confirm_deletes: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            notification_ttl_secs: DEFAULT_NOTIFICATION_TTL_SECS,
            confirm_deletes: true,
        }
    }
}

impl ClientConfig {
    /// Load configuration from an optional file plus the environment.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let config = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path).map_err(|source| {
                    ConfigError::Read {
                        path: path.to_path_buf(),
                        source,
                    }
                })?;
                Self::from_toml_str(&contents)?
            }
            None => Self::default(),
        };

        config
            .with_env_override(std::env::var(ENV_BASE_URL).ok())
            .validate()
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply the value of `MEDICINES_API_URL`, if set and non-empty.
    #[must_use]
    pub fn with_env_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            self.base_url = url;
        }
        self
    }

    /// Replace the base URL and re-validate.
    pub fn with_base_url(mut self, url: impl Into<String>) -> ConfigResult<Self> {
        self.base_url = url.into();
        self.validate()
    }

    /// Check values and normalise the base URL.
    pub fn validate(mut self) -> ConfigResult<Self> {
        let url = self.base_url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url));
        }
        if self.notification_ttl_secs <= 0 {
            return Err(ConfigError::InvalidTtl(self.notification_ttl_secs));
        }
        self.base_url = url;
        Ok(self)
    }

    /// Absolute URL of an API path such as `/medicines`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn notification_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.notification_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default().validate().unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.notification_ttl_secs, 5);
        assert!(config.confirm_deletes);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ClientConfig::from_toml_str("base_url = \"https://meds.example.com/\"")
            .unwrap()
            .validate()
            .unwrap();
        assert_eq!(config.base_url, "https://meds.example.com");
        assert_eq!(config.notification_ttl_secs, 5);
    }

    #[test]
    fn test_full_toml() {
        let toml = r#"
            base_url = "http://10.0.0.5:9000"
            notification_ttl_secs = 10
            confirm_deletes = false
        "#;
        let config = ClientConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.notification_ttl_secs, 10);
        assert!(!config.confirm_deletes);
        assert_eq!(config.notification_ttl(), chrono::Duration::seconds(10));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            ClientConfig::from_toml_str("base_url = 5"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_override() {
        let config = ClientConfig::default().with_env_override(Some("http://api:8080".into()));
        assert_eq!(config.base_url, "http://api:8080");

        let config = ClientConfig::default().with_env_override(Some("  ".into()));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            ClientConfig::default().with_base_url("localhost:8000"),
            Err(ConfigError::InvalidBaseUrl(_))
        ));

        let config = ClientConfig {
            notification_ttl_secs: 0,
            ..ClientConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTtl(0))));
    }

    #[test]
    fn test_endpoint() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint("/medicines"), "http://localhost:8000/medicines");
        assert_eq!(
            config.endpoint("average-price"),
            "http://localhost:8000/average-price"
        );
    }

    #[test]
    fn test_missing_file() {
        let result = ClientConfig::load(Some(Path::new("/nonexistent/medicines.toml")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
