//! Engine configuration
//!
//! Loaded from a JSON file:
//!
//! ```json
//! { "data_dir": "./data", "client": "alice", "log_events": true }
//! ```
//!
//! Only `data_dir` is required.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::identity_key;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one file per storage key
    pub data_dir: PathBuf,

    /// Namespaces the stored identity so several clients can share a data dir
    #[serde(default)]
    pub client: Option<String>,

    /// Emit structured log lines on stderr
    #[serde(default)]
    pub log_events: bool,
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            client: None,
            log_events: false,
        }
    }

    /// Load and validate configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_dir must not be empty".into()));
        }

        if let Some(client) = &self.client {
            // The client name becomes part of a file name
            let valid = !client.is_empty()
                && client
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !valid {
                return Err(ConfigError::Invalid(format!(
                    "Invalid client: '{}'. Use ASCII letters, digits, '-' or '_'.",
                    client
                )));
            }
        }

        Ok(())
    }

    pub fn data_path(&self) -> &Path {
        &self.data_dir
    }

    /// Storage key of this client's identity
    pub fn identity_key(&self) -> String {
        identity_key(self.client.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_json(r#"{"data_dir": "/tmp/forum"}"#).unwrap();
        assert_eq!(config.data_path(), Path::new("/tmp/forum"));
        assert_eq!(config.client, None);
        assert!(!config.log_events);
        assert_eq!(config.identity_key(), "current_user");
    }

    #[test]
    fn test_client_namespaces_identity() {
        let config =
            Config::from_json(r#"{"data_dir": "d", "client": "tab-2", "log_events": true}"#).unwrap();
        assert_eq!(config.identity_key(), "current_user.tab-2");
        assert!(config.log_events);
    }

    #[test]
    fn test_rejects_unsafe_client() {
        let err = Config::from_json(r#"{"data_dir": "d", "client": "../etc"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Config::from_json(r#"{"data_dir": "d", "client": ""}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_missing_or_empty_data_dir() {
        assert!(matches!(
            Config::from_json(r#"{}"#).unwrap_err(),
            ConfigError::Parse(_)
        ));
        assert!(matches!(
            Config::from_json(r#"{"data_dir": ""}"#).unwrap_err(),
            ConfigError::Invalid(_)
        ));
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
