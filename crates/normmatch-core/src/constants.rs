//! Shared constants for the character normalization matcher.

/// Largest valid class identifier. Class ids occupy `0..=MAX_CLASS_ID`.
pub const MAX_CLASS_ID: u32 = 255;

/// Reserved identifier for the "non-character / noise" pseudo-class.
pub const NO_CLASS_ID: u8 = 0;

/// Upper bound on the sample size header of a prototype file.
pub const MAX_NUM_PARAMS: usize = 65_535;

/// Number of channels in a character normalization feature.
pub const CHAR_NORM_NUM_PARAMS: usize = 4;

/// Default prototype file, relative to the data directory.
pub const DEFAULT_PROTO_FILE: &str = "tessdata/normproto";

/// Default distance at which evidence drops to 50%.
pub const DEFAULT_ADJ_MIDPOINT: f64 = 32.0;

/// Default steepness exponent of the evidence curve.
pub const DEFAULT_ADJ_CURL: f64 = 2.0;

/// Noise pseudo-class weight on the squared stroke length.
pub const NOISE_LENGTH_WEIGHT: f64 = 500.0;

/// Noise pseudo-class weight on the squared horizontal radius.
pub const NOISE_RX_WEIGHT: f64 = 8000.0;

/// Noise pseudo-class weight on the squared vertical radius.
pub const NOISE_RY_WEIGHT: f64 = 8000.0;

/// Distance reported for a class with no stored prototypes.
/// Drives the rating to its worst value.
pub const UNMATCHED_DISTANCE: f64 = f64::INFINITY;

/// Name of the project-level config file.
pub const CONFIG_FILE_NAME: &str = "normmatch.toml";
