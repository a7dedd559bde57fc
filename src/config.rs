//! Client configuration: where the WinLearn backend lives.
//!
//! Resolution order: `WINLEARN_API_URL` env var, then
//! `~/.winlearn/config.json`. No timeout is configured by default — a hung
//! backend call hangs the initiating action until the user gives up — but a
//! caller may opt in via the config file.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

pub const API_URL_ENV: &str = "WINLEARN_API_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no API URL configured: set {API_URL_ENV} or create {0}")]
    Missing(String),
    #[error("invalid API URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub request_timeout: Option<Duration>,
}

/// On-disk shape of `~/.winlearn/config.json`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    api_url: String,
    #[serde(default)]
    request_timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Build a config from an explicit base URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let mut url = Url::parse(base_url).map_err(|source| ConfigError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        // Relative endpoint paths join against the last path segment, so the
        // base must end with a slash or a sub-path base would lose it.
        if !url.path().ends_with('/') {
            url.set_path(&format!("{}/", url.path()));
        }
        Ok(Self {
            base_url: url,
            request_timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Resolve from the environment, falling back to the config file.
    pub fn resolve() -> Result<Self, ConfigError> {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                return Self::new(&url);
            }
        }
        let path = config_path();
        Self::load_file(&path)
    }

    /// Load from a specific config file path.
    pub fn load_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(ConfigError::Missing(display));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let file: ConfigFile =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: display,
                source,
            })?;

        let mut config = Self::new(&file.api_url)?;
        config.request_timeout = file.request_timeout_secs.map(Duration::from_secs);
        Ok(config)
    }
}

/// Canonical config file path (`~/.winlearn/config.json`).
pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".winlearn")
        .join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_url() {
        let config = ClientConfig::new("https://lms.example.com/").unwrap();
        assert_eq!(config.base_url.as_str(), "https://lms.example.com/");
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn rejects_garbage_url() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn loads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "apiUrl": "https://lms.example.com", "requestTimeoutSecs": 30 }"#,
        )
        .unwrap();

        let config = ClientConfig::load_file(&path).unwrap();
        assert_eq!(config.base_url.host_str(), Some("lms.example.com"));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(matches!(
            ClientConfig::load_file(&path),
            Err(ConfigError::Missing(_))
        ));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ apiUrl: ").unwrap();
        assert!(matches!(
            ClientConfig::load_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
