//! Compilation of a `SimulationConfig` into solver-ready models.

use xf_core::units::{Pressure, to_mpa};
use xf_hydraulics::{
    MaxConductances, PlantHydraulics, RootDistribution, RootLayerProfile, SoilParameters,
    WeibullCurve, WeibullParameters,
};
use xf_project::schema::{RootZoneDef, SimulationConfig, VariantDef, WeibullDef};
use xf_project::validate_config;
use xf_solver::SupplyVariant;

use crate::error::{AppError, AppResult};

/// Layered root zone ready to be placed at a scenario's predawn pressure.
#[derive(Debug, Clone)]
pub struct RootZoneRuntime {
    pub distribution: RootDistribution,
    pub layers: usize,
    pub offsets: Vec<f64>,
}

impl RootZoneRuntime {
    /// Layer profile with every layer at `predawn` plus its offset.
    pub fn profile_at(
        &self,
        plant: &PlantHydraulics,
        predawn: Pressure,
    ) -> AppResult<RootLayerProfile> {
        let base = to_mpa(predawn);
        let pressures: Vec<f64> = (0..self.layers)
            .map(|i| base + self.offsets.get(i).copied().unwrap_or(0.0))
            .collect();
        Ok(RootLayerProfile::from_distribution(
            &self.distribution,
            plant.kmax.root,
            plant.k_soil,
            &pressures,
        )?)
    }
}

/// Everything a sweep needs, built once from the configuration.
#[derive(Debug, Clone)]
pub struct SweepRuntime {
    pub plant: PlantHydraulics,
    pub variant: SupplyVariant,
    pub root_zone: Option<RootZoneRuntime>,
    /// Critical pressure bounding the predawn grid (MPa)
    pub range_critical_pressure: f64,
    pub scenarios: usize,
    pub output_scale: f64,
    /// `(gmax, vpd)` when transpiration under demand is reported
    pub demand: Option<(f64, f64)>,
}

fn curve(def: &WeibullDef) -> AppResult<WeibullCurve> {
    Ok(WeibullCurve::new(def.b, def.c)?)
}

pub fn compile_plant(config: &SimulationConfig) -> AppResult<PlantHydraulics> {
    let plant = &config.plant;
    let weibull = WeibullParameters {
        root: curve(&plant.root)?,
        stem: curve(&plant.stem)?,
        leaf: curve(&plant.leaf)?,
    };
    let kmax = MaxConductances::new(plant.kmax.root, plant.kmax.stem, plant.kmax.leaf)?;
    let soil = SoilParameters::new(config.soil.alpha, config.soil.n, config.soil.m)?;
    Ok(PlantHydraulics::new(weibull, kmax, config.soil.k_soil, soil)?)
}

pub fn compile_variant(variant: VariantDef) -> SupplyVariant {
    match variant {
        VariantDef::StemLeaf => SupplyVariant::StemLeaf,
        VariantDef::SingleLayer => SupplyVariant::SingleLayer,
        VariantDef::MultiLayer => SupplyVariant::MultiLayer,
    }
}

fn compile_root_zone(zone: &RootZoneDef) -> AppResult<RootZoneRuntime> {
    Ok(RootZoneRuntime {
        distribution: RootDistribution::new(zone.beta, zone.alpha)?,
        layers: zone.layers,
        offsets: zone.pressure_offsets.clone(),
    })
}

/// Validate and compile a configuration.
pub fn compile_sweep(config: &SimulationConfig) -> AppResult<SweepRuntime> {
    validate_config(config)?;
    let variant = compile_variant(config.sweep.variant);
    let root_zone = config.root_zone.as_ref().map(compile_root_zone).transpose()?;
    if variant.needs_root_zone() && root_zone.is_none() {
        return Err(AppError::Compile(format!("variant {variant} needs a root zone")));
    }

    Ok(SweepRuntime {
        plant: compile_plant(config)?,
        variant,
        root_zone,
        range_critical_pressure: curve(&config.range_curve())?.critical_pressure(),
        scenarios: config.sweep.scenarios,
        output_scale: config.sweep.output_scale,
        demand: config.demand.map(|d| (d.gmax, d.vpd)),
    })
}
