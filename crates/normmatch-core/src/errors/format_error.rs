//! Prototype file format errors.
//!
//! Every structural violation found while reading a prototype table is fatal.
//! Variants carry the 1-based line where the problem was found and, where
//! useful, what the grammar expected versus what the source contained.

use std::path::PathBuf;

use super::error_code::{self, NormMatchErrorCode};

/// Errors that can occur while reading a prototype table.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: unexpected end of input, expected {expected}")]
    UnexpectedEof { line: usize, expected: String },

    #[error("line {line}: expected {expected}, found {found:?}")]
    InvalidToken {
        line: usize,
        expected: String,
        found: String,
    },

    #[error("line {line}: sample size {value} must be in 1..={max}")]
    InvalidSampleSize { line: usize, value: i64, max: usize },

    #[error("line {line}: parameter {index} has min {min} greater than max {max}")]
    InvalidParamRange {
        line: usize,
        index: usize,
        min: f64,
        max: f64,
    },

    #[error("line {line}: malformed class block header {found:?}")]
    MalformedBlockHeader { line: usize, found: String },

    #[error("line {line}: class block uses the reserved noise class")]
    ReservedClass { line: usize },

    #[error("line {line}: class character {ch:?} has no single-byte class id")]
    UnsupportedClassChar { line: usize, ch: char },

    #[error("line {line}: class {class:?} declares negative prototype count {count}")]
    NegativeCount { line: usize, class: char, count: i64 },

    #[error("line {line}: variance {value} of parameter {index} must be positive and finite")]
    InvalidVariance {
        line: usize,
        index: usize,
        value: f64,
    },
}

impl FormatError {
    /// Line the error was detected on, when the error is tied to the source text.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Io { .. } => None,
            Self::UnexpectedEof { line, .. }
            | Self::InvalidToken { line, .. }
            | Self::InvalidSampleSize { line, .. }
            | Self::InvalidParamRange { line, .. }
            | Self::MalformedBlockHeader { line, .. }
            | Self::ReservedClass { line }
            | Self::UnsupportedClassChar { line, .. }
            | Self::NegativeCount { line, .. }
            | Self::InvalidVariance { line, .. } => Some(*line),
        }
    }
}

impl NormMatchErrorCode for FormatError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::IO_ERROR,
            _ => error_code::FORMAT_ERROR,
        }
    }
}
