//! End-to-end sweeps through the service layer.

use std::path::PathBuf;
use xf_app::{compile_sweep, render_tsv, run_config, run_sweep, write_json, write_tsv};
use xf_project::schema::{DemandDef, RootZoneDef, SimulationConfig, VariantDef};

#[test]
fn default_sweep_reproduces_reference_flows() {
    let outcome = run_config(&SimulationConfig::default()).unwrap();
    assert_eq!(outcome.records.len(), 50);
    assert_eq!(outcome.failed, 0);
    assert_eq!(outcome.quantity, "regulated_flow");

    let first = &outcome.records[0];
    assert_eq!(first.predawn, 0.0);
    assert!((first.value - 12.682_905_515_0).abs() < 1e-4);
    assert!((outcome.records[10].value - 6.495_424_836_7).abs() < 1e-4);

    for pair in outcome.records.windows(2) {
        assert!(pair[1].value <= pair[0].value + 1e-9);
    }
    let summary = outcome.summary.as_ref().unwrap();
    assert_eq!(summary.peak.x, 0.0);
    assert!(!summary.non_monotonic);
}

#[test]
fn tsv_has_one_line_per_scenario() {
    let mut config = SimulationConfig::default();
    config.sweep.scenarios = 5;
    let outcome = run_config(&config).unwrap();
    let tsv = render_tsv(&outcome);
    let lines: Vec<&str> = tsv.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("0.000000\t12.68290"));
    assert!(lines.iter().all(|l| l.split('\t').count() == 2));
}

#[test]
fn output_scale_multiplies_values() {
    let mut config = SimulationConfig::default();
    config.sweep.scenarios = 2;
    let plain = run_config(&config).unwrap();
    config.sweep.output_scale = 0.5;
    let halved = run_config(&config).unwrap();
    for (a, b) in plain.records.iter().zip(&halved.records) {
        assert!((a.value * 0.5 - b.value).abs() < 1e-12);
    }
}

#[test]
fn demand_sweep_reports_conductance() {
    let mut config = SimulationConfig::default();
    config.sweep.variant = VariantDef::SingleLayer;
    config.sweep.scenarios = 5;
    config.demand = Some(DemandDef {
        gmax: 100.0,
        vpd: 1.0,
    });
    let outcome = run_config(&config).unwrap();
    assert_eq!(outcome.quantity, "canopy_conductance");
    let first = &outcome.records[0];
    assert_eq!(first.regime, Some("demand-limited"));
    assert!((first.value - 99.963_903_33).abs() < 1e-2);
}

#[test]
fn unreachable_scenarios_become_nan() {
    let mut config = SimulationConfig::default();
    config.sweep.variant = VariantDef::MultiLayer;
    config.sweep.scenarios = 4;
    config.root_zone = Some(RootZoneDef {
        layers: 3,
        beta: 0.961,
        alpha: 1.0,
        // Every layer beyond the critical pressure from the start.
        pressure_offsets: vec![3.0, 3.0, 3.0],
    });
    let runtime = compile_sweep(&config).unwrap();
    let outcome = run_sweep(&runtime).unwrap();
    assert_eq!(outcome.failed, 4);
    assert!(outcome.records.iter().all(|r| r.value.is_nan()));
    assert!(outcome.summary.is_none());
    assert!(render_tsv(&outcome).lines().all(|l| l.ends_with("NaN")));
}

#[test]
fn layered_sweep_starts_at_predawn_equilibrium() {
    let mut config = SimulationConfig::default();
    config.sweep.variant = VariantDef::MultiLayer;
    config.sweep.scenarios = 3;
    config.root_zone = Some(RootZoneDef {
        layers: 5,
        beta: 0.961,
        alpha: 1.0,
        pressure_offsets: vec![0.1, 0.3, 0.5, 0.7, 0.9],
    });
    let outcome = run_config(&config).unwrap();
    let first = &outcome.records[0];
    let start = first.start_pressure.unwrap();
    assert!(start > 0.1 && start < 0.9);
    assert!((first.value - 5.1245).abs() < 1e-2);
}

#[test]
fn reports_are_written_with_parent_directories() {
    let mut config = SimulationConfig::default();
    config.sweep.scenarios = 3;
    let outcome = run_config(&config).unwrap();

    let dir: PathBuf = std::env::temp_dir().join("xf_app_reports").join("nested");
    let _ = std::fs::remove_dir_all(&dir);
    let tsv = dir.join("vc_e.txt");
    let json = dir.join("vc_e.json");
    write_tsv(&tsv, &outcome).unwrap();
    write_json(&json, &outcome).unwrap();

    assert_eq!(std::fs::read_to_string(&tsv).unwrap().lines().count(), 3);
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(value["variant"], "stem-leaf");
    assert_eq!(value["records"].as_array().unwrap().len(), 3);
    assert_eq!(value["records"][0]["converged"], true);
}
