//! End-to-end supply and regulation against reference values for the
//! built-in plant.

use xf_hydraulics::{
    MaxConductances, PlantHydraulics, RootDistribution, RootLayerProfile, SoilParameters,
    WeibullParameters,
};
use xf_solver::{
    DemandRegime, FlowPath, MultiLayerPath, SingleLayerPath, StemLeafPath, build_supply_curve,
    find_regulation, max_regulated_flow, transpiration_under_demand,
};

fn reference_plant() -> PlantHydraulics {
    PlantHydraulics::new(
        WeibullParameters::from_array([1.7, 3.0, 2.0, 3.0, 1.3, 3.0]).unwrap(),
        MaxConductances::new(20.0, 40.0, 40.0).unwrap(),
        2.07e12,
        SoilParameters::new(602.0419, 1.48, 0.324324).unwrap(),
    )
    .unwrap()
}

/// Predawn pressure of scenario `i` on the 50-step grid.
fn predawn(plant: &PlantHydraulics, i: usize) -> f64 {
    plant.critical_pressure() / 50.0 * i as f64
}

#[test]
fn stem_leaf_curve_starts_unstressed() {
    let plant = reference_plant();
    let path = StemLeafPath::new(&plant, 0.0);
    let curve = build_supply_curve(&path).unwrap();

    assert_eq!(curve.first().leaf_pressure, 0.0);
    assert_eq!(curve.first().flow, 0.0);
    assert!((curve.first().slope - 20.0).abs() < 1e-3);
    assert!((curve.last().leaf_pressure - plant.critical_pressure()).abs() < 1e-12);
    assert!((curve.last().flow - 23.410_069_39).abs() < 1e-4);
    assert!(curve.is_converged());
}

#[test]
fn stem_leaf_regulated_flow_matches_reference() {
    let plant = reference_plant();
    let expected = [
        (0, 12.682_905_515_0, 0.653_316_62),
        (10, 6.495_424_836_7, 0.860_554_03),
        (20, 2.539_528_672_2, 1.184_119_64),
        (30, 0.606_574_665_1, 1.590_943_94),
        (40, 0.057_924_968_3, 2.044_030_02),
    ];
    for (i, e_reg, p_reg) in expected {
        let path = StemLeafPath::new(&plant, predawn(&plant, i));
        let curve = build_supply_curve(&path).unwrap();
        let reg = find_regulation(&curve).unwrap();
        let flow = max_regulated_flow(&path, &curve).unwrap();
        assert!((reg.pressure - p_reg).abs() < 1e-4, "scenario {i}: p_reg {}", reg.pressure);
        assert!((flow.flow - e_reg).abs() < 1e-4, "scenario {i}: e_reg {}", flow.flow);
    }
}

#[test]
fn stem_leaf_regulated_flow_is_reproducible() {
    let plant = reference_plant();
    let run = || {
        let path = StemLeafPath::new(&plant, 0.0);
        let curve = build_supply_curve(&path).unwrap();
        max_regulated_flow(&path, &curve).unwrap().flow
    };
    let first = run();
    for _ in 0..3 {
        assert!((run() - first).abs() < 1e-6);
    }
}

#[test]
fn drier_soil_never_raises_regulated_flow() {
    let plant = reference_plant();
    let mut previous = f64::INFINITY;
    for i in (0..50).step_by(5) {
        let path = StemLeafPath::new(&plant, predawn(&plant, i));
        let curve = build_supply_curve(&path).unwrap();
        let e_reg = max_regulated_flow(&path, &curve).unwrap().flow;
        assert!(e_reg <= previous + 1e-9, "scenario {i}: {e_reg} > {previous}");
        previous = e_reg;
    }
}

#[test]
fn single_layer_curve_matches_reference() {
    let plant = reference_plant();
    let path = SingleLayerPath::new(&plant, 0.0);
    let curve = build_supply_curve(&path).unwrap();

    assert_eq!(curve.first().leaf_pressure, 0.0);
    assert!((curve.first().slope - 10.0).abs() < 1e-3);
    assert!((curve.last().flow - 12.137_718_07).abs() < 1e-4);

    let reg = find_regulation(&curve).unwrap();
    assert!((reg.pressure - 0.688_432_40).abs() < 1e-4);
    let e_reg = max_regulated_flow(&path, &curve).unwrap();
    assert!((e_reg.flow - 6.688_835_759_7).abs() < 1e-4);
}

#[test]
fn single_layer_flow_rises_with_leaf_tension() {
    let plant = reference_plant();
    let path = SingleLayerPath::new(&plant, predawn(&plant, 10));
    let curve = build_supply_curve(&path).unwrap();
    for pair in curve.points().windows(2) {
        assert!(pair[1].flow >= pair[0].flow - 1e-6);
    }
}

#[test]
fn transpiration_regimes_match_reference() {
    let plant = reference_plant();
    let path = SingleLayerPath::new(&plant, 0.0);
    let curve = build_supply_curve(&path).unwrap();

    let wide_open = transpiration_under_demand(&path, &curve, 1000.0, 1.0).unwrap();
    assert_eq!(wide_open.regime, DemandRegime::RegulationLimited);
    assert!((wide_open.conductance - 668.883_575_97).abs() < 1e-2);

    let modest = transpiration_under_demand(&path, &curve, 100.0, 1.0).unwrap();
    assert_eq!(modest.regime, DemandRegime::DemandLimited);
    assert!((modest.conductance - 99.963_903_33).abs() < 1e-2);

    let tiny = transpiration_under_demand(&path, &curve, 1.0, 1.0).unwrap();
    assert!((tiny.conductance - 1.0).abs() < 1e-3);

    let still = transpiration_under_demand(&path, &curve, 100.0, 0.0).unwrap();
    assert_eq!(still.regime, DemandRegime::NoDemand);
    assert_eq!(still.conductance, 0.0);
}

#[test]
fn stressed_transpiration_matches_reference() {
    let plant = reference_plant();
    let path = SingleLayerPath::new(&plant, predawn(&plant, 10));
    let curve = build_supply_curve(&path).unwrap();
    let t = transpiration_under_demand(&path, &curve, 100.0, 1.0).unwrap();
    assert!((t.conductance - 97.247_125_31).abs() < 1e-2);
    let e_reg = max_regulated_flow(&path, &curve).unwrap();
    assert!((e_reg.flow - 3.593_579_827_0).abs() < 1e-4);
}

#[test]
fn negative_demand_inputs_are_rejected() {
    let plant = reference_plant();
    let path = StemLeafPath::new(&plant, 0.0);
    let curve = build_supply_curve(&path).unwrap();
    assert!(transpiration_under_demand(&path, &curve, -1.0, 1.0).is_err());
    assert!(transpiration_under_demand(&path, &curve, 1.0, f64::NAN).is_err());
}

#[test]
fn multi_layer_curve_starts_at_predawn() {
    let plant = reference_plant();
    let dist = RootDistribution::new(0.961, 1.0).unwrap();
    let profile = RootLayerProfile::from_distribution(
        &dist,
        plant.kmax.root,
        plant.k_soil,
        &[0.1, 0.3, 0.5, 0.7, 0.9],
    )
    .unwrap();
    let path = MultiLayerPath::new(&plant, &profile).unwrap();
    let predawn = path.predawn();
    assert!(predawn.converged);
    assert!(predawn.pressure >= profile.min_soil_pressure());
    assert!(predawn.pressure <= profile.max_soil_pressure());

    let curve = build_supply_curve(&path).unwrap();
    assert_eq!(curve.first().leaf_pressure, path.start_pressure());
    assert!(curve.first().flow.abs() < 1e-4);
    assert!((curve.first().slope - 9.96).abs() < 0.05);
    assert!(curve.last().flow > curve.first().flow);

    let e_reg = max_regulated_flow(&path, &curve).unwrap();
    assert!((e_reg.flow - 5.1245).abs() < 1e-2);
}
