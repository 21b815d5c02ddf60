//! Character normalization features.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::collections::SmallVec4;
use crate::constants::CHAR_NORM_NUM_PARAMS;

/// Named channels of a character normalization feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharNormParam {
    /// Vertical position of the character's center.
    VerticalPosition,
    /// Total outline length.
    Length,
    /// Horizontal radius of gyration.
    HorizontalRadius,
    /// Vertical radius of gyration.
    VerticalRadius,
}

impl CharNormParam {
    pub const ALL: [CharNormParam; CHAR_NORM_NUM_PARAMS] = [
        Self::VerticalPosition,
        Self::Length,
        Self::HorizontalRadius,
        Self::VerticalRadius,
    ];

    /// Position of this channel in the feature vector.
    pub const fn index(self) -> usize {
        match self {
            Self::VerticalPosition => 0,
            Self::Length => 1,
            Self::HorizontalRadius => 2,
            Self::VerticalRadius => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::VerticalPosition => "vertical_position",
            Self::Length => "length",
            Self::HorizontalRadius => "horizontal_radius",
            Self::VerticalRadius => "vertical_radius",
        }
    }
}

/// Feature vector extracted upstream for one character instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    values: SmallVec4<f64>,
}

impl Feature {
    /// Wrap raw parameter values.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Build a character normalization feature from its named channels.
    pub fn char_norm(
        vertical_position: f64,
        length: f64,
        horizontal_radius: f64,
        vertical_radius: f64,
    ) -> Self {
        Self::new([vertical_position, length, horizontal_radius, vertical_radius])
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a named channel, if the feature is wide enough to carry it.
    pub fn get(&self, param: CharNormParam) -> Option<f64> {
        self.values.get(param.index()).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Index<CharNormParam> for Feature {
    type Output = f64;

    fn index(&self, param: CharNormParam) -> &f64 {
        &self.values[param.index()]
    }
}
