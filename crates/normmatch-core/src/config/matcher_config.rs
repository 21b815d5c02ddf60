//! Matcher configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ADJ_CURL, DEFAULT_ADJ_MIDPOINT, DEFAULT_PROTO_FILE};

/// Configuration for the normalization matcher.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct MatcherConfig {
    /// Prototype file path. Default: `tessdata/normproto`.
    pub proto_file: Option<String>,
    /// Distance at which evidence drops to 50%. Default: 32.0.
    pub adj_midpoint: Option<f64>,
    /// Steepness of the evidence curve. Default: 2.0.
    pub adj_curl: Option<f64>,
    /// Treat an unparsable class block header as an error instead of the
    /// end of the table. Default: false.
    pub strict_block_scan: Option<bool>,
}

impl MatcherConfig {
    /// Returns the effective prototype file, defaulting to `tessdata/normproto`.
    pub fn effective_proto_file(&self) -> &str {
        self.proto_file.as_deref().unwrap_or(DEFAULT_PROTO_FILE)
    }

    /// Returns the effective midpoint, defaulting to 32.0.
    pub fn effective_adj_midpoint(&self) -> f64 {
        self.adj_midpoint.unwrap_or(DEFAULT_ADJ_MIDPOINT)
    }

    /// Returns the effective curl, defaulting to 2.0.
    pub fn effective_adj_curl(&self) -> f64 {
        self.adj_curl.unwrap_or(DEFAULT_ADJ_CURL)
    }

    /// Returns the effective block scan strictness, defaulting to false.
    pub fn effective_strict_block_scan(&self) -> bool {
        self.strict_block_scan.unwrap_or(false)
    }
}
