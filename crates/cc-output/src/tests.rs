//! Integration tests for cc-output.

use std::fs;

use cc_core::SimParams;
use cc_scenario::{MatrixSpec, RateSpec, Scenario, ScenarioData, Topology};
use cc_sim::SimBuilder;

use crate::{CsvMetricsWriter, KpiOutputObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn small_scenario() -> Scenario {
    let data = ScenarioData {
        s:  vec![2, 2],
        c:  RateSpec { args: vec![12.0, 6.0] },
        mu: MatrixSpec { args: vec![vec![0.5, 0.5], vec![0.5, 0.5]] },
        v:  RateSpec { args: vec![0.2, 0.2] },
        distribution: Default::default(),
    };
    Scenario::build(Topology::X, &data).unwrap()
}

fn params(horizon_secs: u64, sample_interval_ticks: u64) -> SimParams {
    SimParams {
        horizon_secs,
        awt_secs: 20,
        sl_threshold: 0.80,
        seed: 42,
        call_flow_size: 5_000,
        sample_interval_ticks,
    }
}

// ── CSV backend through a full run ────────────────────────────────────────────

#[test]
fn csv_files_written_at_sampling_interval() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = small_scenario();
    let writer = CsvMetricsWriter::new(dir.path()).unwrap();
    let mut observer = KpiOutputObserver::new(writer, &scenario);

    let mut sim = SimBuilder::new(scenario, params(100, 10)).build().unwrap();
    sim.run(&mut observer).unwrap();
    assert!(observer.take_error().is_none());

    let class_csv = fs::read_to_string(dir.path().join("class_kpis.csv")).unwrap();
    let pool_csv = fs::read_to_string(dir.path().join("pool_kpis.csv")).unwrap();

    // Header + 10 samples (ticks 0, 10, …, 90) × 2 entities each.
    assert_eq!(class_csv.lines().count(), 1 + 10 * 2);
    assert_eq!(pool_csv.lines().count(), 1 + 10 * 2);
    assert_eq!(
        class_csv.lines().next().unwrap(),
        "tick,class,service_level,abandon_ratio"
    );
    assert_eq!(pool_csv.lines().next().unwrap(), "tick,pool,busy,occupancy");
}

#[test]
fn rows_carry_external_labels() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = small_scenario();
    let writer = CsvMetricsWriter::new(dir.path()).unwrap();
    let mut observer = KpiOutputObserver::new(writer, &scenario);

    let mut sim = SimBuilder::new(scenario, params(20, 20)).build().unwrap();
    sim.run(&mut observer).unwrap();

    let class_csv = fs::read_to_string(dir.path().join("class_kpis.csv")).unwrap();
    assert!(class_csv.contains("0,c1,"));
    assert!(class_csv.contains("0,c2,"));
    let pool_csv = fs::read_to_string(dir.path().join("pool_kpis.csv")).unwrap();
    assert!(pool_csv.contains("0,s1,"));
    assert!(pool_csv.contains("0,s2,"));
}

#[test]
fn sampling_disabled_writes_headers_only() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = small_scenario();
    let writer = CsvMetricsWriter::new(dir.path()).unwrap();
    let mut observer = KpiOutputObserver::new(writer, &scenario);

    let mut sim = SimBuilder::new(scenario, params(50, 0)).build().unwrap();
    sim.run(&mut observer).unwrap();
    assert!(observer.take_error().is_none());

    let class_csv = fs::read_to_string(dir.path().join("class_kpis.csv")).unwrap();
    assert_eq!(class_csv.lines().count(), 1);
}

#[test]
fn missing_directory_surfaces_as_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    assert!(CsvMetricsWriter::new(&missing).is_err());
}
