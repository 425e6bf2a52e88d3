//! AI provider configuration
//!
//! The provider credential is always passed in as an explicit value - the
//! classifier itself never reads ambient process state. Resolution order at
//! the application boundary:
//! 1. `TALLY_AI_*` environment variables
//! 2. Config file override (~/.config/tally/provider.toml)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default request timeout for provider calls, in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the remote classification provider
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of an OpenAI-compatible chat completions endpoint
    pub base_url: String,
    /// Model name to request
    #[serde(default = "default_model")]
    pub model: String,
    /// Bearer credential, if the provider requires one
    #[serde(default)]
    pub api_key: Option<String>,
    /// Bounded timeout for a single classification request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ProviderConfig {
    /// Create a config with defaults for model and timeout
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: default_model(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create from environment variables
    ///
    /// Required: `TALLY_AI_HOST`
    /// Optional: `TALLY_AI_MODEL`, `TALLY_AI_KEY`, `TALLY_AI_TIMEOUT_SECS`
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("TALLY_AI_HOST").ok()?;
        let mut config = Self::new(&base_url);
        if let Ok(model) = std::env::var("TALLY_AI_MODEL") {
            config.model = model;
        }
        config.api_key = std::env::var("TALLY_AI_KEY").ok();
        if let Some(secs) = std::env::var("TALLY_AI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.timeout_secs = secs;
        }
        Some(config)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let mut config: ProviderConfig = toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Platform config file location (~/.config/tally/provider.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tally").join("provider.toml"))
    }

    /// Resolve provider settings: environment first, then the config file
    ///
    /// Returns None when neither is present - the classifier then runs with
    /// the two local tiers only.
    pub fn resolve() -> Option<Self> {
        if let Some(config) = Self::from_env() {
            return Some(config);
        }
        let path = Self::default_path()?;
        if path.exists() {
            match Self::load(&path) {
                Ok(config) => return Some(config),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable provider config");
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
base_url = "https://api.example.com/"
model = "small-classifier"
api_key = "sk-test"
timeout_secs = 3
"#
        )
        .unwrap();

        let config = ProviderConfig::load(file.path()).unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.model, "small-classifier");
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_load_minimal_config_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"base_url = "http://localhost:8000""#).unwrap();

        let config = ProviderConfig::load(file.path()).unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not toml at all [").unwrap();

        assert!(matches!(
            ProviderConfig::load(file.path()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = ProviderConfig::new("http://localhost:8000/");
        assert_eq!(config.base_url, "http://localhost:8000");
    }
}
