//! Top-level matcher configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::MatcherConfig;
use crate::constants::CONFIG_FILE_NAME;
use crate::errors::ConfigError;

/// Top-level configuration.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`NORMMATCH_*`)
/// 3. Project config (`normmatch.toml` in the project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct NormMatchConfig {
    pub matcher: MatcherConfig,
}

/// Caller-supplied overrides that win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub proto_file: Option<String>,
    pub adj_midpoint: Option<f64>,
    pub adj_curl: Option<f64>,
    pub strict_block_scan: Option<bool>,
}

impl NormMatchConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3: project config
        let project_config_path = root.join(CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): explicit overrides
        if let Some(o) = overrides {
            Self::apply_overrides(&mut config, o);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &NormMatchConfig) -> Result<(), ConfigError> {
        if let Some(midpoint) = config.matcher.adj_midpoint {
            validate_positive("matcher.adj_midpoint", midpoint)?;
        }
        if let Some(curl) = config.matcher.adj_curl {
            validate_positive("matcher.adj_curl", curl)?;
        }
        if let Some(ref proto_file) = config.matcher.proto_file {
            if proto_file.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "matcher.proto_file".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut NormMatchConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: NormMatchConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut NormMatchConfig, other: &NormMatchConfig) {
        if other.matcher.proto_file.is_some() {
            base.matcher.proto_file = other.matcher.proto_file.clone();
        }
        if other.matcher.adj_midpoint.is_some() {
            base.matcher.adj_midpoint = other.matcher.adj_midpoint;
        }
        if other.matcher.adj_curl.is_some() {
            base.matcher.adj_curl = other.matcher.adj_curl;
        }
        if other.matcher.strict_block_scan.is_some() {
            base.matcher.strict_block_scan = other.matcher.strict_block_scan;
        }
    }

    /// Apply environment variable overrides.
    /// Values that fail to parse are ignored.
    fn apply_env_overrides(config: &mut NormMatchConfig) {
        if let Ok(val) = std::env::var("NORMMATCH_PROTO_FILE") {
            config.matcher.proto_file = Some(val);
        }
        if let Ok(val) = std::env::var("NORMMATCH_ADJ_MIDPOINT") {
            if let Ok(v) = val.parse::<f64>() {
                config.matcher.adj_midpoint = Some(v);
            }
        }
        if let Ok(val) = std::env::var("NORMMATCH_ADJ_CURL") {
            if let Ok(v) = val.parse::<f64>() {
                config.matcher.adj_curl = Some(v);
            }
        }
        if let Ok(val) = std::env::var("NORMMATCH_STRICT_BLOCK_SCAN") {
            if let Ok(v) = val.parse::<bool>() {
                config.matcher.strict_block_scan = Some(v);
            }
        }
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut NormMatchConfig, o: &ConfigOverrides) {
        if let Some(ref v) = o.proto_file {
            config.matcher.proto_file = Some(v.clone());
        }
        if let Some(v) = o.adj_midpoint {
            config.matcher.adj_midpoint = Some(v);
        }
        if let Some(v) = o.adj_curl {
            config.matcher.adj_curl = Some(v);
        }
        if let Some(v) = o.strict_block_scan {
            config.matcher.strict_block_scan = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Shared domain rule for the evidence curve knobs: finite and strictly positive.
pub fn validate_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: format!("must be a finite value greater than 0, got {value}"),
        });
    }
    Ok(())
}
