//! Live shape parameters of the evidence curve.
//!
//! Values are validated when set and read with a single atomic load on
//! every scoring call, so a change made through a shared handle applies to
//! the next match without reloading the table. The two knobs are read
//! independently; no consistency between them is promised within one call.

use std::sync::atomic::{AtomicU64, Ordering};

use normmatch_core::config::{validate_positive, MatcherConfig};
use normmatch_core::constants::{DEFAULT_ADJ_CURL, DEFAULT_ADJ_MIDPOINT};
use normmatch_core::errors::ConfigError;

/// Midpoint and curl of the distance-to-evidence transform.
#[derive(Debug)]
pub struct Tunables {
    midpoint: AtomicU64,
    curl: AtomicU64,
}

impl Tunables {
    pub fn new(midpoint: f64, curl: f64) -> Result<Self, ConfigError> {
        validate_positive("adj_midpoint", midpoint)?;
        validate_positive("adj_curl", curl)?;
        Ok(Self {
            midpoint: AtomicU64::new(midpoint.to_bits()),
            curl: AtomicU64::new(curl.to_bits()),
        })
    }

    pub fn from_config(config: &MatcherConfig) -> Result<Self, ConfigError> {
        Self::new(config.effective_adj_midpoint(), config.effective_adj_curl())
    }

    /// Distance at which evidence is 0.5.
    pub fn midpoint(&self) -> f64 {
        f64::from_bits(self.midpoint.load(Ordering::Relaxed))
    }

    /// Steepness exponent.
    pub fn curl(&self) -> f64 {
        f64::from_bits(self.curl.load(Ordering::Relaxed))
    }

    pub fn set_midpoint(&self, midpoint: f64) -> Result<(), ConfigError> {
        validate_positive("adj_midpoint", midpoint)?;
        self.midpoint.store(midpoint.to_bits(), Ordering::Relaxed);
        tracing::debug!(midpoint, "Norm adjust midpoint changed");
        Ok(())
    }

    pub fn set_curl(&self, curl: f64) -> Result<(), ConfigError> {
        validate_positive("adj_curl", curl)?;
        self.curl.store(curl.to_bits(), Ordering::Relaxed);
        tracing::debug!(curl, "Norm adjust curl changed");
        Ok(())
    }
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            midpoint: AtomicU64::new(DEFAULT_ADJ_MIDPOINT.to_bits()),
            curl: AtomicU64::new(DEFAULT_ADJ_CURL.to_bits()),
        }
    }
}
