use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{CacheConfig, ConfigError, LoggingConfig, RulesConfig, UpstreamConfig};

/// Root configuration, loaded from TOML.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub doh_url: Option<String>,
    pub rules_path: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from `path`, or defaults when no path is given,
    /// then apply CLI overrides.
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(url) = overrides.doh_url {
            self.upstream.doh_url = url;
        }
        if let Some(path) = overrides.rules_path {
            self.rules.path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.upstream.doh_url;
        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(ConfigError::Validation(format!(
                "upstream.doh_url must start with http:// or https://, got '{}'",
                url
            )));
        }

        if self.upstream.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "upstream.query_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.rules.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "rules.path cannot be empty".to_string(),
            ));
        }

        if !LoggingConfig::is_valid_level(&self.logging.level) {
            return Err(ConfigError::Validation(format!(
                "logging.level '{}' is not one of trace, debug, info, warn, error",
                self.logging.level
            )));
        }

        Ok(())
    }
}
