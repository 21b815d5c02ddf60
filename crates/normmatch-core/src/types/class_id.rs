//! Bounded class identifier.
//!
//! Class ids are single-byte codes, normally the character the class
//! represents. Id 0 is reserved for the noise pseudo-class and never names
//! a trained class.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_CLASS_ID, NO_CLASS_ID};
use crate::errors::BoundsError;

/// Validated class identifier in `0..=MAX_CLASS_ID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(u8);

/// The "non-character / noise" pseudo-class.
pub const NO_CLASS: ClassId = ClassId(NO_CLASS_ID);

impl ClassId {
    /// Create a class id from its byte value. Every byte is in range.
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Class id for a class character. Only Latin-1 characters map to a
    /// single-byte id.
    pub fn from_char(ch: char) -> Result<Self, BoundsError> {
        u8::try_from(u32::from(ch))
            .map(Self)
            .map_err(|_| BoundsError::ClassCharOutOfRange { ch })
    }

    /// Raw byte value.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// The character this class id stands for.
    pub fn as_char(self) -> char {
        char::from(self.0)
    }

    /// True for the noise pseudo-class.
    pub const fn is_noise(self) -> bool {
        self.0 == NO_CLASS_ID
    }
}

impl TryFrom<u32> for ClassId {
    type Error = BoundsError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map(Self)
            .map_err(|_| BoundsError::ClassIdOutOfRange {
                value,
                max: MAX_CLASS_ID,
            })
    }
}

impl From<u8> for ClassId {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_noise() {
            write!(f, "<noise>")
        } else if self.0.is_ascii_graphic() {
            write!(f, "{}", self.as_char())
        } else {
            write!(f, "#{}", self.0)
        }
    }
}
