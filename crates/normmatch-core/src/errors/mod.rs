//! Error handling for the normalization matcher.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod bounds_error;
pub mod config_error;
pub mod error_code;
pub mod format_error;
pub mod match_error;
pub mod table_error;

pub use bounds_error::BoundsError;
pub use config_error::ConfigError;
pub use error_code::NormMatchErrorCode;
pub use format_error::FormatError;
pub use match_error::MatchError;
pub use table_error::TableError;

/// Top-level error for lifecycle operations (config resolution, table load).
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum NormMatchError {
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Match error: {0}")]
    Match(#[from] MatchError),
}

impl NormMatchErrorCode for NormMatchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Format(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Match(e) => e.error_code(),
        }
    }
}

/// Convenience alias for lifecycle results.
pub type NormMatchResult<T> = Result<T, NormMatchError>;
