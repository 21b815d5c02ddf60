//! Configuration system for the matcher.
//! TOML-based, layered resolution: overrides > env > project > defaults.

pub mod matcher_config;
pub mod normmatch_config;

pub use matcher_config::MatcherConfig;
pub use normmatch_config::{validate_positive, ConfigOverrides, NormMatchConfig};
