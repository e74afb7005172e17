// Validator configuration

use crate::{ConfigurationError, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Prefix of the environment variables read by [`ValidatorConfig::from_env`]
pub const ENV_PREFIX: &str = "ARMATURE_VALIDATION";

/// Settings of a [`Validator`](crate::Validator)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Deepest nesting level the walker descends into
    pub max_depth: usize,
    /// Record the rejected value on each violation
    pub capture_invalid_values: bool,
    /// Message of the violation recorded when `max_depth` is exceeded
    pub depth_limit_message: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_depth: 32,
            capture_invalid_values: true,
            depth_limit_message: "nesting depth exceeds limit".to_string(),
        }
    }
}

impl ValidatorConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable or disable capturing rejected values
    pub fn with_capture_invalid_values(mut self, capture: bool) -> Self {
        self.capture_invalid_values = capture;
        self
    }

    /// Set the depth limit message
    pub fn with_depth_limit_message(mut self, message: impl Into<String>) -> Self {
        self.depth_limit_message = message.into();
        self
    }

    /// Load from `ARMATURE_VALIDATION_*` environment variables.
    ///
    /// A `.env` file in the working directory is read first when present.
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(format!("{}_{}", ENV_PREFIX, key)).ok())
    }

    fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("MAX_DEPTH") {
            config.max_depth = raw.trim().parse().map_err(|_| {
                ConfigurationError::InvalidConfig(format!("MAX_DEPTH must be a number, got {:?}", raw))
            })?;
        }
        if let Some(raw) = lookup("CAPTURE_VALUES") {
            config.capture_invalid_values = parse_flag(&raw).ok_or_else(|| {
                ConfigurationError::InvalidConfig(format!(
                    "CAPTURE_VALUES must be true or false, got {:?}",
                    raw
                ))
            })?;
        }
        if let Some(message) = lookup("DEPTH_LIMIT_MESSAGE") {
            config.depth_limit_message = message;
        }

        config.check()
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigurationError::InvalidConfig(format!("TOML parse error: {}", e)))?;
        config.check()
    }

    /// Parse a JSON document
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| ConfigurationError::InvalidConfig(format!("JSON parse error: {}", e)))?;
        config.check()
    }

    /// Load from a `.toml` or `.json` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigurationError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_str(&content),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&content),
            other => Err(ConfigurationError::InvalidConfig(format!(
                "Unsupported configuration format: {}",
                other.unwrap_or("none")
            ))),
        }
    }

    fn check(self) -> Result<Self> {
        if self.max_depth == 0 {
            return Err(ConfigurationError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
