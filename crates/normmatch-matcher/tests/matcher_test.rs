//! Matcher context lifecycle and query API.

use std::path::Path;
use std::sync::Mutex;

use normmatch_core::config::{ConfigOverrides, NormMatchConfig};
use normmatch_core::errors::{BoundsError, MatchError, NormMatchError, NormMatchErrorCode};
use normmatch_core::types::{ClassId, Feature, ParamDesc, Prototype};
use normmatch_matcher::format::writer::table_to_string;
use normmatch_matcher::{BlockScanPolicy, NormMatcher, PrototypeTable, Tunables};

/// Serializes tests that read `NORMMATCH_*` variables through config loading.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn table(y: f64) -> PrototypeTable {
    let mut t = PrototypeTable::new(vec![ParamDesc::linear(0.0, 1.0); 4]).unwrap();
    t.push(
        ClassId::new(b'a'),
        Prototype::elliptical(vec![y, 0.0, 0.0, 0.0], vec![1.0; 4]),
    )
    .unwrap();
    t
}

fn write_table(path: &Path, y: f64) {
    std::fs::write(path, table_to_string(&table(y)).unwrap()).unwrap();
}

fn feature() -> Feature {
    Feature::char_norm(4.0, 0.0, 0.0, 0.0)
}

#[test]
fn test_out_of_range_class_id_rejected() {
    let matcher = NormMatcher::with_table(table(0.0), Tunables::default());
    let err = matcher.compute_match(256, &feature(), false).unwrap_err();
    assert_eq!(
        err,
        MatchError::Bounds(BoundsError::ClassIdOutOfRange { value: 256, max: 255 })
    );
    assert!(matches!(
        matcher.compute_match_char('Ж', &feature(), false),
        Err(MatchError::Bounds(BoundsError::ClassCharOutOfRange { .. }))
    ));
}

#[test]
fn test_char_and_id_queries_agree() {
    let matcher = NormMatcher::with_table(table(0.0), Tunables::default());
    let by_id = matcher.compute_match(u32::from(b'a'), &feature(), false).unwrap();
    let by_char = matcher.compute_match_char('a', &feature(), false).unwrap();
    assert_eq!(by_id, by_char);
    // d = 16, midpoint 32, curl 2
    assert!((by_id - (1.0 - 1.0 / 1.25)).abs() < 1e-12);
}

#[test]
fn test_unloaded_matcher() {
    let matcher = NormMatcher::new(Tunables::default());
    assert!(!matcher.is_loaded());
    assert_eq!(
        matcher.compute_match(u32::from(b'a'), &feature(), false),
        Err(MatchError::NotLoaded)
    );
    // The noise class never consults the table.
    assert_eq!(
        matcher.compute_match(0, &Feature::char_norm(0.0, 0.0, 0.0, 0.0), false),
        Ok(0.0)
    );
    assert!(matches!(
        matcher.explain_match(u32::from(b'a'), &feature()),
        Err(MatchError::NotLoaded)
    ));
}

#[test]
fn test_noise_explained_without_table() {
    let matcher = NormMatcher::new(Tunables::default());
    let noisy = Feature::char_norm(0.3, 0.1, 0.05, 0.02);

    let breakdown = matcher.explain_match(0, &noisy).unwrap();
    assert!(breakdown.class_id.is_noise());
    assert!(breakdown.candidates.is_empty());
    assert_eq!(
        Ok(breakdown.rating),
        matcher.compute_match(0, &noisy, false)
    );

    // Loading a table does not change the noise explanation.
    let loaded = NormMatcher::with_table(table(0.0), Tunables::default());
    assert_eq!(loaded.explain_match(0, &noisy).unwrap(), breakdown);
}

#[test]
fn test_load_reload_unload() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("normproto");
    write_table(&path, 0.0);

    let mut matcher = NormMatcher::new(Tunables::default());
    matcher.load(&path).unwrap();
    let first = matcher.compute_match_char('a', &feature(), false).unwrap();

    // A snapshot outlives the swap.
    let snapshot = matcher.table().unwrap();

    write_table(&path, 4.0);
    matcher.reload().unwrap();
    let second = matcher.compute_match_char('a', &feature(), false).unwrap();
    assert!(first > 0.0);
    assert_eq!(second, 0.0);
    assert_eq!(snapshot.prototypes(ClassId::new(b'a'))[0].mean[0], 0.0);

    matcher.unload();
    assert!(!matcher.is_loaded());
    assert!(matches!(
        matcher.compute_match_char('a', &feature(), false),
        Err(MatchError::NotLoaded)
    ));
    let err = matcher.reload().unwrap_err();
    assert_eq!(err.error_code(), "NOT_LOADED");
}

#[test]
fn test_failed_load_keeps_previous_table() {
    let dir = tempfile::TempDir::new().unwrap();
    let good = dir.path().join("good");
    let bad = dir.path().join("bad");
    write_table(&good, 0.0);
    std::fs::write(&bad, "not a table\n").unwrap();

    let mut matcher = NormMatcher::new(Tunables::default());
    matcher.load(&good).unwrap();
    assert!(matcher.load(&bad).is_err());
    assert!(matcher.is_loaded());
    assert!(matcher.compute_match_char('a', &feature(), false).is_ok());
}

#[test]
fn test_strict_policy_applies_to_loads() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("normproto");
    let text = format!("{}?? trailing\n", table_to_string(&table(0.0)).unwrap());
    std::fs::write(&path, text).unwrap();

    let mut tolerant = NormMatcher::new(Tunables::default());
    tolerant.load(&path).unwrap();
    assert!(tolerant.table().unwrap().load_report().stopped_early.is_some());

    let mut strict = NormMatcher::new(Tunables::default()).with_policy(BlockScanPolicy::Strict);
    assert!(strict.load(&path).is_err());
}

#[test]
fn test_shared_tunables_apply_without_reload() {
    let matcher = NormMatcher::with_table(table(0.0), Tunables::default());
    let knobs = matcher.tunables().clone();

    let before = matcher.compute_match_char('a', &feature(), false).unwrap();
    knobs.set_midpoint(16.0).unwrap();
    let after = matcher.compute_match_char('a', &feature(), false).unwrap();
    assert!((before - 0.2).abs() < 1e-12);
    assert_eq!(after, 0.5);

    assert!(knobs.set_curl(0.0).is_err());
    assert_eq!(matcher.tunables().curl(), 2.0);
}

#[test]
fn test_from_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("normproto");
    write_table(&path, 0.0);

    let overrides = ConfigOverrides {
        proto_file: Some(path.display().to_string()),
        adj_midpoint: Some(16.0),
        adj_curl: Some(3.0),
        strict_block_scan: Some(true),
    };
    let config = NormMatchConfig::load(dir.path(), Some(&overrides)).unwrap();
    let matcher = NormMatcher::from_config(&config).unwrap();

    assert!(matcher.is_loaded());
    assert_eq!(matcher.tunables().midpoint(), 16.0);
    assert_eq!(matcher.tunables().curl(), 3.0);
    let r = matcher.compute_match_char('a', &feature(), false).unwrap();
    assert_eq!(r, 0.5);
}

#[test]
fn test_from_config_missing_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let dir = tempfile::TempDir::new().unwrap();
    let overrides = ConfigOverrides {
        proto_file: Some(dir.path().join("absent").display().to_string()),
        ..Default::default()
    };
    let config = NormMatchConfig::load(dir.path(), Some(&overrides)).unwrap();
    match NormMatcher::from_config(&config) {
        Err(e @ NormMatchError::Format(_)) => assert_eq!(e.error_code(), "IO_ERROR"),
        other => panic!("Expected Format error, got: {:?}", other),
    }
}
