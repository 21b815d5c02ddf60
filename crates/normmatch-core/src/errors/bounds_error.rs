//! Class identifier bounds errors.

use super::error_code::{self, NormMatchErrorCode};

/// A class identifier outside the valid identifier space.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoundsError {
    #[error("class id {value} out of range (max {max})")]
    ClassIdOutOfRange { value: u32, max: u32 },

    #[error("class character {ch:?} has no single-byte class id")]
    ClassCharOutOfRange { ch: char },
}

impl NormMatchErrorCode for BoundsError {
    fn error_code(&self) -> &'static str {
        error_code::BOUNDS_ERROR
    }
}
