//! Loading a fixed dataset from disk.

use chrono::{TimeZone, Utc};
use coachdash_core::{config::GeneratorConfig, generator::generate, DashboardError, Dataset};

fn dataset() -> Dataset {
    let config = GeneratorConfig {
        seed: Some(77),
        ..GeneratorConfig::default()
    };
    generate(&config, Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()).unwrap()
}

#[test]
fn saved_dataset_loads_back() {
    let original = dataset();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dataset.json");
    original.to_json_file(&path).unwrap();

    let loaded = Dataset::from_json_file(&path).unwrap();
    assert_eq!(loaded.snapshot_id, original.snapshot_id);
    assert_eq!(loaded.seed, 77);
    assert_eq!(loaded.csrs, original.csrs);
    assert_eq!(loaded.simulations.len(), original.simulations.len());
    for (a, b) in loaded.simulations.iter().zip(&original.simulations) {
        assert_eq!(a.simulation_id, b.simulation_id);
        assert_eq!(a.timestamp, b.timestamp);
        assert_eq!(a.call_status, b.call_status);
        assert!((a.total_score - b.total_score).abs() < 1e-9);
    }
}

#[test]
fn unsorted_file_is_reordered_newest_first() {
    let mut original = dataset();
    original.simulations.reverse();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dataset.json");
    original.to_json_file(&path).unwrap();

    let loaded = Dataset::from_json_file(&path).unwrap();
    assert!(loaded
        .simulations
        .windows(2)
        .all(|w| w[0].timestamp >= w[1].timestamp));
}

#[test]
fn tampered_record_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dataset.json");
    dataset().to_json_file(&path).unwrap();

    let mut value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    value["simulations"][0]["criteria_passed"] = serde_json::json!(99);
    std::fs::write(&path, value.to_string()).unwrap();

    match Dataset::from_json_file(&path) {
        Err(DashboardError::InvariantViolation { .. }) => {}
        other => panic!("expected InvariantViolation, got {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Dataset::from_json_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, DashboardError::Io(_)));
}
