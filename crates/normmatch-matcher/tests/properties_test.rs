//! Property tests for the evidence transform and the scorer.

use normmatch_core::types::{ClassId, Feature, ParamDesc, Prototype, NO_CLASS};
use normmatch_matcher::scorer::prototype_distance;
use normmatch_matcher::{compute_match, evidence, rating, PrototypeTable, Tunables};
use proptest::prelude::*;

fn general_evidence(d: f64, midpoint: f64, curl: f64) -> f64 {
    1.0 / (1.0 + (d / midpoint).powf(curl))
}

fn arb_prototype() -> impl Strategy<Value = Prototype> {
    (
        prop::array::uniform4(-1.0f64..1.0),
        prop::array::uniform4(0.001f64..10.0),
    )
        .prop_map(|(mean, var)| Prototype::elliptical(mean.to_vec(), var.to_vec()))
}

fn arb_feature() -> impl Strategy<Value = Feature> {
    prop::array::uniform4(-2.0f64..2.0).prop_map(|v| Feature::new(v))
}

proptest! {
    #[test]
    fn rating_is_monotone_in_distance(
        a in 0.0f64..1e6,
        b in 0.0f64..1e6,
        midpoint in 0.1f64..100.0,
        curl in 0.1f64..6.0,
    ) {
        let t = Tunables::new(midpoint, curl).unwrap();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(rating(lo, &t) <= rating(hi, &t));
    }

    #[test]
    fn rating_anchor_points(midpoint in 0.1f64..1000.0, curl in 0.1f64..6.0) {
        let t = Tunables::new(midpoint, curl).unwrap();
        prop_assert_eq!(rating(0.0, &t), 0.0);
        prop_assert!((rating(midpoint, &t) - 0.5).abs() < 1e-12);
        prop_assert_eq!(rating(f64::INFINITY, &t), 1.0);
    }

    #[test]
    fn fast_curls_match_general_power(
        frac in 0.0f64..1.0,
        midpoint in 0.1f64..100.0,
        cubic in any::<bool>(),
    ) {
        let curl = if cubic { 3.0 } else { 2.0 };
        let d = frac * 1000.0 * midpoint;
        let fast = evidence(d, midpoint, curl);
        let slow = general_evidence(d, midpoint, curl);
        prop_assert!(
            (fast - slow).abs() <= 1e-6 * slow.abs() + f64::MIN_POSITIVE,
            "d={} midpoint={} curl={}: {} vs {}", d, midpoint, curl, fast, slow
        );
    }

    #[test]
    fn match_equals_rating_of_nearest_prototype(
        protos in prop::collection::vec(arb_prototype(), 1..8),
        feature in arb_feature(),
    ) {
        let class = ClassId::new(b'k');
        let mut table = PrototypeTable::new(vec![ParamDesc::linear(-1.0, 1.0); 4]).unwrap();
        for p in &protos {
            table.push(class, p.clone()).unwrap();
        }
        let t = Tunables::default();
        let d_min = protos
            .iter()
            .map(|p| prototype_distance(&feature, p))
            .fold(f64::INFINITY, f64::min);

        let r = compute_match(&table, &t, class, &feature, false).unwrap();
        prop_assert_eq!(r, rating(d_min, &t));
        prop_assert!((0.0..=1.0).contains(&r));
    }

    #[test]
    fn noise_rating_ignores_table_and_vertical_position(
        protos in prop::collection::vec(arb_prototype(), 0..4),
        feature in arb_feature(),
        other_y in -2.0f64..2.0,
    ) {
        let mut table = PrototypeTable::new(vec![ParamDesc::linear(-1.0, 1.0); 4]).unwrap();
        for p in protos {
            table.push(ClassId::new(b'n'), p).unwrap();
        }
        let empty = PrototypeTable::new(vec![ParamDesc::linear(-1.0, 1.0); 4]).unwrap();
        let t = Tunables::default();

        let mut moved = feature.values().to_vec();
        moved[0] = other_y;
        let moved = Feature::new(moved);

        let r1 = compute_match(&table, &t, NO_CLASS, &feature, false).unwrap();
        let r2 = compute_match(&empty, &t, NO_CLASS, &moved, false).unwrap();
        prop_assert_eq!(r1, r2);
    }
}
