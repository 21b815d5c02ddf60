//! Distance-to-evidence transform.
//!
//! ```text
//! evidence(d) = 1 / (1 + (d / midpoint)^curl)
//! rating(d)   = 1 - evidence(d)
//! ```
//!
//! `evidence(0) = 1`, `evidence(midpoint) = 0.5`, and evidence falls
//! toward 0 as `d` grows. Curls of 2 and 3 skip `powf`.

use crate::tunables::Tunables;

/// Evidence for a non-negative distance.
pub fn evidence(distance: f64, midpoint: f64, curl: f64) -> f64 {
    let adj = distance / midpoint;
    let scaled = if curl == 3.0 {
        adj * adj * adj
    } else if curl == 2.0 {
        adj * adj
    } else {
        adj.powf(curl)
    };
    1.0 / (1.0 + scaled)
}

/// Rating for a distance under the current tunables: 0 is a perfect match,
/// 1 the worst.
pub fn rating(distance: f64, tunables: &Tunables) -> f64 {
    1.0 - evidence(distance, tunables.midpoint(), tunables.curl())
}
