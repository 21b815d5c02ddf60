//! Per-dimension parameter descriptors.

use serde::{Deserialize, Serialize};

/// Static metadata for one feature dimension, shared by every prototype
/// in a table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamDesc {
    /// Dimension wraps around (e.g. an angle).
    pub circular: bool,
    /// Dimension may be ignored when clustering.
    pub non_essential: bool,
    pub min: f64,
    pub max: f64,
    /// `max - min`.
    pub range: f64,
    /// `range / 2`.
    pub half_range: f64,
    /// `(max + min) / 2`.
    pub mid_range: f64,
}

impl ParamDesc {
    /// Build a descriptor and its derived range fields.
    pub fn new(circular: bool, essential: bool, min: f64, max: f64) -> Self {
        let range = max - min;
        Self {
            circular,
            non_essential: !essential,
            min,
            max,
            range,
            half_range: range / 2.0,
            mid_range: (max + min) / 2.0,
        }
    }

    /// Linear, essential dimension over `[min, max]`.
    pub fn linear(min: f64, max: f64) -> Self {
        Self::new(false, true, min, max)
    }

    pub fn is_essential(&self) -> bool {
        !self.non_essential
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_ranges() {
        let desc = ParamDesc::new(true, false, -0.5, 1.5);
        assert!(desc.circular);
        assert!(!desc.is_essential());
        assert_eq!(desc.range, 2.0);
        assert_eq!(desc.half_range, 1.0);
        assert_eq!(desc.mid_range, 0.5);
    }
}
