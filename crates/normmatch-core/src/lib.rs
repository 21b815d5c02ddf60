//! # normmatch-core
//!
//! Foundation crate for the character normalization matcher.
//! Defines the shared types, errors, config, tracing setup, and constants.
//! The matcher crate depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::NormMatchConfig;
pub use errors::{BoundsError, ConfigError, FormatError, MatchError, NormMatchError, TableError};
pub use types::{CharNormParam, ClassId, Feature, ParamDesc, Prototype, PrototypeStyle};
