//! Nearest-prototype match scoring.
//!
//! A trained class is scored by the weighted squared distance from the
//! feature to its closest prototype over two channels, vertical position
//! and horizontal radius:
//!
//! ```text
//! d_p = (f.y  - p.mean[y])²  · p.weight[y]
//!     + (f.rx - p.mean[rx])² · p.weight[rx]
//! ```
//!
//! The noise class has no prototypes and uses a fixed penalty on length
//! and both radii instead.

use normmatch_core::constants::{
    CHAR_NORM_NUM_PARAMS, NOISE_LENGTH_WEIGHT, NOISE_RX_WEIGHT, NOISE_RY_WEIGHT,
    UNMATCHED_DISTANCE,
};
use normmatch_core::errors::MatchError;
use normmatch_core::types::{CharNormParam, ClassId, Feature, Prototype, NO_CLASS};

use crate::evidence::{evidence, rating};
use crate::table::PrototypeTable;
use crate::tunables::Tunables;

const MATCH_CHANNELS: [CharNormParam; 2] =
    [CharNormParam::VerticalPosition, CharNormParam::HorizontalRadius];

/// Match details for one candidate prototype.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtoMatch {
    /// Position of the prototype in its class list.
    pub index: usize,
    /// Weighted squared distance `d_p`.
    pub distance: f64,
    /// Rating this prototype alone would produce.
    pub rating: f64,
    /// `(f[i] - mean[i]) / sqrt(variance[i])` for every dimension both carry.
    pub deviations: Vec<f64>,
    /// Sum of squared deviations over the match channels.
    pub deviation_total: f64,
    /// Evidence the deviation total would carry as a distance.
    pub deviation_evidence: f64,
}

/// Everything that went into one match rating.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchBreakdown {
    pub class_id: ClassId,
    /// Empty for the noise class and for classes without prototypes.
    pub candidates: Vec<ProtoMatch>,
    pub best_distance: f64,
    pub rating: f64,
}

impl MatchBreakdown {
    /// Candidate with the smallest distance, if any.
    pub fn best(&self) -> Option<&ProtoMatch> {
        self.candidates
            .iter()
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Fixed "looks like noise" distance.
pub fn noise_distance(feature: &Feature) -> f64 {
    let length = feature[CharNormParam::Length];
    let rx = feature[CharNormParam::HorizontalRadius];
    let ry = feature[CharNormParam::VerticalRadius];
    length * length * NOISE_LENGTH_WEIGHT + rx * rx * NOISE_RX_WEIGHT + ry * ry * NOISE_RY_WEIGHT
}

/// Weighted squared distance from `feature` to `proto` on the match channels.
pub fn prototype_distance(feature: &Feature, proto: &Prototype) -> f64 {
    MATCH_CHANNELS
        .iter()
        .map(|&p| {
            let i = p.index();
            let delta = feature[p] - proto.mean[i];
            delta * delta * proto.weight[i]
        })
        .sum()
}

/// Distance to the nearest prototype, or `UNMATCHED_DISTANCE` for an empty list.
pub fn best_distance(feature: &Feature, protos: &[Prototype]) -> f64 {
    protos
        .iter()
        .map(|p| prototype_distance(feature, p))
        .fold(UNMATCHED_DISTANCE, f64::min)
}

/// Rate how well `feature` fits `class_id`. 0 is a perfect match, values
/// approaching 1 are poor matches.
///
/// With `debug` set, the per-prototype breakdown is emitted as `debug`
/// events; the returned rating is the same either way.
pub fn compute_match(
    table: &PrototypeTable,
    tunables: &Tunables,
    class_id: ClassId,
    feature: &Feature,
    debug: bool,
) -> Result<f64, MatchError> {
    check_feature(feature)?;

    if class_id.is_noise() {
        return Ok(rating(noise_distance(feature), tunables));
    }
    check_table(table)?;

    if debug {
        let breakdown = breakdown(table, tunables, class_id, feature);
        report(&breakdown, feature, table);
        return Ok(breakdown.rating);
    }

    Ok(rating(best_distance(feature, table.prototypes(class_id)), tunables))
}

/// Same rating as [`compute_match`], with the per-prototype details.
pub fn explain_match(
    table: &PrototypeTable,
    tunables: &Tunables,
    class_id: ClassId,
    feature: &Feature,
) -> Result<MatchBreakdown, MatchError> {
    if class_id.is_noise() {
        return explain_noise(tunables, feature);
    }
    check_feature(feature)?;
    check_table(table)?;
    Ok(breakdown(table, tunables, class_id, feature))
}

/// Noise breakdown without a table.
pub(crate) fn explain_noise(tunables: &Tunables, feature: &Feature) -> Result<MatchBreakdown, MatchError> {
    check_feature(feature)?;
    let d = noise_distance(feature);
    Ok(MatchBreakdown {
        class_id: NO_CLASS,
        candidates: Vec::new(),
        best_distance: d,
        rating: rating(d, tunables),
    })
}

/// Noise rating without a table.
pub(crate) fn noise_rating(tunables: &Tunables, feature: &Feature) -> Result<f64, MatchError> {
    check_feature(feature)?;
    Ok(rating(noise_distance(feature), tunables))
}

fn check_feature(feature: &Feature) -> Result<(), MatchError> {
    if feature.len() < CHAR_NORM_NUM_PARAMS {
        return Err(MatchError::FeatureDimension {
            expected: CHAR_NORM_NUM_PARAMS,
            found: feature.len(),
        });
    }
    Ok(())
}

fn check_table(table: &PrototypeTable) -> Result<(), MatchError> {
    if table.num_params() < CHAR_NORM_NUM_PARAMS {
        return Err(MatchError::TableDimension {
            expected: CHAR_NORM_NUM_PARAMS,
            found: table.num_params(),
        });
    }
    Ok(())
}

fn breakdown(
    table: &PrototypeTable,
    tunables: &Tunables,
    class_id: ClassId,
    feature: &Feature,
) -> MatchBreakdown {
    let candidates: Vec<ProtoMatch> = table
        .prototypes(class_id)
        .iter()
        .enumerate()
        .map(|(index, proto)| {
            let distance = prototype_distance(feature, proto);
            let deviations: Vec<f64> = feature
                .values()
                .iter()
                .zip(&proto.mean)
                .enumerate()
                .map(|(i, (f, mean))| (f - mean) / proto.std_dev(i))
                .collect();
            let deviation_total: f64 = MATCH_CHANNELS
                .iter()
                .map(|p| deviations[p.index()] * deviations[p.index()])
                .sum();
            ProtoMatch {
                index,
                distance,
                rating: rating(distance, tunables),
                deviations,
                deviation_total,
                deviation_evidence: evidence(deviation_total, tunables.midpoint(), tunables.curl()),
            }
        })
        .collect();

    let best = candidates
        .iter()
        .map(|c| c.distance)
        .fold(UNMATCHED_DISTANCE, f64::min);

    MatchBreakdown {
        class_id,
        candidates,
        best_distance: best,
        rating: rating(best, tunables),
    }
}

fn report(breakdown: &MatchBreakdown, feature: &Feature, table: &PrototypeTable) {
    let _span = tracing::debug_span!("normmatch.match", class = %breakdown.class_id).entered();
    tracing::debug!(feature = ?feature.values(), "Matching feature");
    for (candidate, proto) in breakdown
        .candidates
        .iter()
        .zip(table.prototypes(breakdown.class_id))
    {
        tracing::debug!(
            proto = candidate.index,
            mean = ?proto.mean,
            variance = ?proto.variance,
            deviations = ?candidate.deviations,
            deviation_total = candidate.deviation_total,
            deviation_evidence = candidate.deviation_evidence,
            distance = candidate.distance,
            rating = candidate.rating,
            "Prototype match"
        );
    }
    tracing::debug!(
        best_distance = breakdown.best_distance,
        rating = breakdown.rating,
        "Best match"
    );
}
