use std::path::PathBuf;
use xf_project::schema::*;
use xf_project::{ProjectError, load_config, load_json, load_yaml, save_json, save_yaml};

fn configs_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../configs")
}

#[test]
fn roundtrip_yaml_default_config() {
    let config = SimulationConfig::default();
    let path = std::env::temp_dir().join("xf_project_roundtrip_default.yaml");

    save_yaml(&path, &config).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(config, loaded);
}

#[test]
fn roundtrip_json_with_every_section() {
    let mut config = SimulationConfig::two_parameter(1.9, 2.5, 1.4, 3.0);
    config.sweep.variant = VariantDef::MultiLayer;
    config.root_zone = Some(RootZoneDef {
        layers: 3,
        beta: 0.95,
        alpha: 2.0,
        pressure_offsets: vec![0.0, 0.1, 0.3],
    });
    config.demand = Some(DemandDef {
        gmax: 120.0,
        vpd: 1.5,
    });
    let path = std::env::temp_dir().join("xf_project_roundtrip_full.json");

    save_json(&path, &config).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(config, loaded);
}

#[test]
fn invalid_config_is_not_saved() {
    let mut config = SimulationConfig::default();
    config.soil.k_soil = -1.0;
    let path = std::env::temp_dir().join("xf_project_invalid.yaml");
    assert!(matches!(
        save_yaml(&path, &config),
        Err(ProjectError::Validation(_))
    ));
}

#[test]
fn shipped_configs_load() {
    let layered = load_config(&configs_dir().join("layered.yaml")).unwrap();
    assert_eq!(layered.sweep.variant, VariantDef::MultiLayer);
    assert_eq!(layered.root_zone.as_ref().map(|z| z.layers), Some(5));

    let demand = load_config(&configs_dir().join("demand.json")).unwrap();
    assert_eq!(demand.sweep.variant, VariantDef::SingleLayer);
    assert_eq!(demand.sweep.output_scale, 1.0);
    assert!(demand.demand.is_some());
}

#[test]
fn unknown_extension_is_refused() {
    let err = load_config(&configs_dir().join("layered.toml")).unwrap_err();
    assert!(matches!(err, ProjectError::Format { .. }));
}
