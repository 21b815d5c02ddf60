//! Prototype table construction errors.

use super::error_code::{self, NormMatchErrorCode};

/// Violations of the prototype table invariants when building a table in code.
///
/// These mirror the checks the file reader applies, so any table that can
/// be built can also be written and read back.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    #[error("table needs at least one parameter descriptor")]
    NoParams,

    #[error("parameter {index} has invalid range [{min}, {max}]")]
    InvalidParamRange { index: usize, min: f64, max: f64 },

    #[error("the noise class cannot hold prototypes")]
    ReservedClass,

    #[error("prototype for class {class} has {found} parameters, table has {expected}")]
    DimensionMismatch {
        class: String,
        expected: usize,
        found: usize,
    },

    #[error("prototype for class {class} has variance {value} at parameter {index}, must be positive and finite")]
    InvalidVariance {
        class: String,
        index: usize,
        value: f64,
    },

    #[error("spherical prototype for class {class} has differing variances")]
    NonUniformVariance { class: String },

    #[error("weights of prototype for class {class} do not match its variances")]
    WeightMismatch { class: String },

    #[error("mixed prototype for class {class} has {found} distributions, expected {expected}")]
    MissingDistributions {
        class: String,
        expected: usize,
        found: usize,
    },

    #[error("{style} prototype for class {class} carries distributions")]
    UnexpectedDistributions { class: String, style: &'static str },
}

impl NormMatchErrorCode for TableError {
    fn error_code(&self) -> &'static str {
        error_code::TABLE_ERROR
    }
}
