//! Soil-to-leaf flow paths.
//!
//! A [`FlowPath`] maps a leaf tension to the steady flow the plant can
//! supply at that tension. The three paths differ only in how much of the
//! soil-plant continuum they resolve:
//!
//! - [`StemLeafPath`]: stem and leaf, roots held at the sweep start
//! - [`SingleLayerPath`]: one soil column, rhizosphere and roots included
//! - [`MultiLayerPath`]: layered soil around a shared root zone

use crate::estimate::{FlowEstimate, PressureEstimate};
use crate::error::{SolverError, SolverResult};
use crate::newton::{NewtonConfig, newton_solve};
use crate::policy::{MULTI_LAYER_SLOPE_FRACTION, SINGLE_LAYER_SLOPE_FRACTION, STEM_LEAF_SLOPE_STEP};
use crate::soil_root::{predawn_pressure, soil_root_flow, soil_root_flow_multi};
use crate::stem_leaf::stem_leaf_flow;
use std::fmt;
use std::str::FromStr;
use xf_core::numeric::clamp_tension;
use xf_hydraulics::{PlantHydraulics, RootLayerProfile};

/// Equilibrium soil-to-leaf flow for one soil column at `p_soil`.
///
/// Solves for the root-zone tension at which soil-root uptake equals
/// stem-leaf transport, and reports the mean of the two.
pub fn whole_plant_flow(
    plant: &PlantHydraulics,
    p_soil: f64,
    p_leaf: f64,
) -> SolverResult<FlowEstimate> {
    let p_soil = clamp_tension(p_soil);
    let residual = |p_root: f64| -> SolverResult<f64> {
        Ok(stem_leaf_flow(plant, p_root, p_leaf)?.flow - soil_root_flow(plant, p_soil, p_root)?.flow)
    };
    let config = NewtonConfig::labelled("whole-plant root pressure").bounds(0.0, f64::INFINITY);
    let solve = newton_solve(p_soil, residual, &config)?;

    let above = stem_leaf_flow(plant, solve.x, p_leaf)?;
    let below = soil_root_flow(plant, p_soil, solve.x)?;
    Ok(FlowEstimate::from_solve(0.5 * (above.flow + below.flow), &solve).with_inner(&[above, below]))
}

/// Equilibrium soil-to-leaf flow drawing on every layer of `profile`.
pub fn whole_plant_flow_multi(
    plant: &PlantHydraulics,
    profile: &RootLayerProfile,
    p_leaf: f64,
) -> SolverResult<FlowEstimate> {
    let residual = |p_root: f64| -> SolverResult<f64> {
        Ok(stem_leaf_flow(plant, p_root, p_leaf)?.flow
            - soil_root_flow_multi(plant, profile, p_root)?.flow)
    };
    let config =
        NewtonConfig::labelled("whole-plant root pressure (layered)").bounds(0.0, f64::INFINITY);
    let solve = newton_solve(profile.min_soil_pressure(), residual, &config)?;

    let above = stem_leaf_flow(plant, solve.x, p_leaf)?;
    let below = soil_root_flow_multi(plant, profile, solve.x)?;
    Ok(FlowEstimate::from_solve(0.5 * (above.flow + below.flow), &solve).with_inner(&[above, below]))
}

/// Leaf tension to supplied flow, for one soil state.
pub trait FlowPath: Sync {
    /// Path name for diagnostics.
    fn name(&self) -> &'static str;

    /// Leaf tension at which supply starts (zero flow).
    fn start_pressure(&self) -> f64;

    /// Leaf tension at which the pathway is considered cavitated.
    fn critical_pressure(&self) -> f64;

    /// Finite-difference step for the supply-curve slope.
    fn slope_step(&self) -> f64;

    /// Supplied flow at leaf tension `p_leaf`.
    fn flow(&self, p_leaf: f64) -> SolverResult<FlowEstimate>;
}

/// Stem and leaf only; the root collar sits at the sweep start.
#[derive(Debug, Clone, Copy)]
pub struct StemLeafPath<'a> {
    plant: &'a PlantHydraulics,
    p_root: f64,
}

impl<'a> StemLeafPath<'a> {
    pub fn new(plant: &'a PlantHydraulics, p_root: f64) -> Self {
        Self {
            plant,
            p_root: clamp_tension(p_root),
        }
    }
}

impl FlowPath for StemLeafPath<'_> {
    fn name(&self) -> &'static str {
        "stem-leaf"
    }

    fn start_pressure(&self) -> f64 {
        self.p_root
    }

    fn critical_pressure(&self) -> f64 {
        self.plant.critical_pressure()
    }

    fn slope_step(&self) -> f64 {
        STEM_LEAF_SLOPE_STEP
    }

    fn flow(&self, p_leaf: f64) -> SolverResult<FlowEstimate> {
        stem_leaf_flow(self.plant, self.p_root, p_leaf)
    }
}

/// Soil, rhizosphere, root, stem and leaf over one soil column.
#[derive(Debug, Clone, Copy)]
pub struct SingleLayerPath<'a> {
    plant: &'a PlantHydraulics,
    p_soil: f64,
}

impl<'a> SingleLayerPath<'a> {
    pub fn new(plant: &'a PlantHydraulics, p_soil: f64) -> Self {
        Self {
            plant,
            p_soil: clamp_tension(p_soil),
        }
    }
}

impl FlowPath for SingleLayerPath<'_> {
    fn name(&self) -> &'static str {
        "single-layer"
    }

    fn start_pressure(&self) -> f64 {
        self.p_soil
    }

    fn critical_pressure(&self) -> f64 {
        self.plant.critical_pressure()
    }

    fn slope_step(&self) -> f64 {
        self.plant.critical_pressure() * SINGLE_LAYER_SLOPE_FRACTION
    }

    fn flow(&self, p_leaf: f64) -> SolverResult<FlowEstimate> {
        whole_plant_flow(self.plant, self.p_soil, p_leaf)
    }
}

/// The full continuum over a layered root zone. Supply starts at the
/// predawn equilibrium of the layers.
#[derive(Debug, Clone)]
pub struct MultiLayerPath<'a> {
    plant: &'a PlantHydraulics,
    profile: &'a RootLayerProfile,
    predawn: PressureEstimate,
}

impl<'a> MultiLayerPath<'a> {
    /// Solves for the predawn pressure of `profile`.
    pub fn new(plant: &'a PlantHydraulics, profile: &'a RootLayerProfile) -> SolverResult<Self> {
        let predawn = predawn_pressure(plant, profile)?;
        Ok(Self {
            plant,
            profile,
            predawn,
        })
    }

    pub fn predawn(&self) -> PressureEstimate {
        self.predawn
    }
}

impl FlowPath for MultiLayerPath<'_> {
    fn name(&self) -> &'static str {
        "multi-layer"
    }

    fn start_pressure(&self) -> f64 {
        self.predawn.pressure
    }

    fn critical_pressure(&self) -> f64 {
        self.plant.critical_pressure()
    }

    fn slope_step(&self) -> f64 {
        (self.plant.critical_pressure() - self.predawn.pressure) * MULTI_LAYER_SLOPE_FRACTION
    }

    fn flow(&self, p_leaf: f64) -> SolverResult<FlowEstimate> {
        whole_plant_flow_multi(self.plant, self.profile, p_leaf)
    }
}

/// Which part of the continuum a supply curve resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupplyVariant {
    #[default]
    StemLeaf,
    SingleLayer,
    MultiLayer,
}

impl SupplyVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplyVariant::StemLeaf => "stem-leaf",
            SupplyVariant::SingleLayer => "single-layer",
            SupplyVariant::MultiLayer => "multi-layer",
        }
    }

    pub fn needs_root_zone(&self) -> bool {
        matches!(self, SupplyVariant::MultiLayer)
    }
}

impl fmt::Display for SupplyVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupplyVariant {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stem-leaf" => Ok(SupplyVariant::StemLeaf),
            "single-layer" => Ok(SupplyVariant::SingleLayer),
            "multi-layer" => Ok(SupplyVariant::MultiLayer),
            other => Err(SolverError::InvalidInput {
                what: format!("unknown supply variant '{other}'"),
            }),
        }
    }
}
