//! Scoring-time errors.

use super::bounds_error::BoundsError;
use super::error_code::{self, NormMatchErrorCode};

/// Errors that can occur when scoring a feature against a class.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error(transparent)]
    Bounds(#[from] BoundsError),

    #[error("no prototype table is loaded")]
    NotLoaded,

    #[error("feature has {found} channels, at least {expected} required")]
    FeatureDimension { expected: usize, found: usize },

    #[error("prototype table has {found} parameters, at least {expected} required")]
    TableDimension { expected: usize, found: usize },
}

impl NormMatchErrorCode for MatchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Bounds(e) => e.error_code(),
            Self::NotLoaded => error_code::NOT_LOADED,
            Self::FeatureDimension { .. } | Self::TableDimension { .. } => {
                error_code::MATCH_ERROR
            }
        }
    }
}
