//! Cluster prototypes: the stored reference statistics for one cluster of
//! training samples of a class.

use serde::{Deserialize, Serialize};

/// Shape of the cluster a prototype summarizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrototypeStyle {
    /// One variance shared by every dimension.
    Spherical,
    /// One variance per dimension.
    Elliptical,
    /// One variance and one distribution per dimension.
    Mixed,
    /// Style chosen by the clusterer; stored like `Elliptical`.
    Automatic,
}

impl PrototypeStyle {
    /// Keyword used in the prototype file.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Spherical => "spherical",
            Self::Elliptical => "elliptical",
            Self::Mixed => "mixed",
            Self::Automatic => "automatic",
        }
    }
}

/// Per-dimension sample distribution of a mixed prototype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Distribution {
    Normal,
    Uniform,
    Random,
}

impl Distribution {
    /// Keyword used in the prototype file.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Uniform => "uniform",
            Self::Random => "random",
        }
    }
}

/// Reference statistics for one cluster. Immutable once loaded.
///
/// `mean`, `variance`, and `weight` all hold one entry per dimension.
/// Spherical prototypes broadcast their single variance to every
/// dimension so that matching never needs to look at the style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prototype {
    pub significant: bool,
    pub style: PrototypeStyle,
    pub num_samples: u32,
    pub mean: Vec<f64>,
    pub variance: Vec<f64>,
    /// `1 / variance`: larger weight, tighter cluster.
    pub weight: Vec<f64>,
    /// Present only for `Mixed` prototypes.
    pub distributions: Option<Vec<Distribution>>,
}

impl Prototype {
    /// Assemble a prototype and derive its weights from `variance`.
    pub fn new(
        significant: bool,
        style: PrototypeStyle,
        num_samples: u32,
        mean: Vec<f64>,
        variance: Vec<f64>,
        distributions: Option<Vec<Distribution>>,
    ) -> Self {
        let weight = variance.iter().map(|v| v.recip()).collect();
        Self {
            significant,
            style,
            num_samples,
            mean,
            variance,
            weight,
            distributions,
        }
    }

    /// Significant elliptical prototype with one variance per dimension.
    pub fn elliptical(mean: Vec<f64>, variance: Vec<f64>) -> Self {
        Self::new(true, PrototypeStyle::Elliptical, 1, mean, variance, None)
    }

    /// Significant spherical prototype; `variance` is shared by every dimension.
    pub fn spherical(mean: Vec<f64>, variance: f64) -> Self {
        let n = mean.len();
        Self::new(true, PrototypeStyle::Spherical, 1, mean, vec![variance; n], None)
    }

    /// Number of dimensions.
    pub fn num_params(&self) -> usize {
        self.mean.len()
    }

    /// Whether `variance` can back a weight: positive, finite, and with a
    /// finite reciprocal.
    pub fn is_valid_variance(variance: f64) -> bool {
        variance.is_finite() && variance > 0.0 && variance.recip().is_finite()
    }

    /// Standard deviation of dimension `i`.
    pub fn std_dev(&self, i: usize) -> f64 {
        self.variance[i].sqrt()
    }
}
