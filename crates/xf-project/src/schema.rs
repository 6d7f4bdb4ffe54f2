//! Simulation configuration schema.

use serde::{Deserialize, Serialize};

/// Highest schema version this crate reads.
pub const LATEST_VERSION: u32 = 1;

fn default_version() -> u32 {
    LATEST_VERSION
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub name: String,
    pub plant: PlantDef,
    pub soil: SoilDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_zone: Option<RootZoneDef>,
    #[serde(default)]
    pub sweep: SweepDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demand: Option<DemandDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeibullDef {
    /// Scale (MPa)
    pub b: f64,
    /// Shape
    pub c: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OrganKmaxDef {
    pub root: f64,
    pub stem: f64,
    pub leaf: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlantDef {
    pub root: WeibullDef,
    pub stem: WeibullDef,
    pub leaf: WeibullDef,
    pub kmax: OrganKmaxDef,
}

/// Saturated soil conductance plus van Genuchten retention parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SoilDef {
    pub k_soil: f64,
    pub alpha: f64,
    pub n: f64,
    pub m: f64,
}

/// Layered root zone. Layer `i` sits at the scenario's predawn pressure
/// plus `pressure_offsets[i]`; no offsets means uniformly wet layers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RootZoneDef {
    pub layers: usize,
    pub beta: f64,
    pub alpha: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pressure_offsets: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VariantDef {
    #[default]
    StemLeaf,
    SingleLayer,
    MultiLayer,
}

fn default_scenarios() -> usize {
    50
}

fn default_output_scale() -> f64 {
    1.0
}

/// Outer sweep over predawn soil pressure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepDef {
    #[serde(default)]
    pub variant: VariantDef,
    #[serde(default = "default_scenarios")]
    pub scenarios: usize,
    /// Curve whose critical pressure bounds the predawn grid; the leaf
    /// curve when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<WeibullDef>,
    /// Factor applied to every reported value.
    #[serde(default = "default_output_scale")]
    pub output_scale: f64,
}

impl Default for SweepDef {
    fn default() -> Self {
        Self {
            variant: VariantDef::default(),
            scenarios: default_scenarios(),
            range: None,
            output_scale: default_output_scale(),
        }
    }
}

/// Atmospheric demand: maximum stomatal conductance and vapour pressure
/// deficit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DemandDef {
    pub gmax: f64,
    pub vpd: f64,
}

impl Default for SimulationConfig {
    /// The built-in plant on the built-in soil, stem-leaf variant.
    fn default() -> Self {
        Self {
            version: LATEST_VERSION,
            name: "default".to_string(),
            plant: PlantDef {
                root: WeibullDef { b: 1.7, c: 3.0 },
                stem: WeibullDef { b: 2.0, c: 3.0 },
                leaf: WeibullDef { b: 1.3, c: 3.0 },
                kmax: OrganKmaxDef {
                    root: 20.0,
                    stem: 40.0,
                    leaf: 40.0,
                },
            },
            soil: SoilDef {
                k_soil: 2.07e12,
                alpha: 602.0419,
                n: 1.48,
                m: 0.324324,
            },
            root_zone: None,
            sweep: SweepDef::default(),
            demand: None,
        }
    }
}

impl SimulationConfig {
    /// Every organ shares one vulnerability curve `(fb, fc)`; the predawn
    /// grid is bounded by the critical pressure of `(lb, lc)`. Runs the full
    /// single-layer continuum.
    pub fn two_parameter(fb: f64, fc: f64, lb: f64, lc: f64) -> Self {
        let shared = WeibullDef { b: fb, c: fc };
        let base = Self::default();
        Self {
            name: format!("two-parameter {fb} {fc} {lb} {lc}"),
            plant: PlantDef {
                root: shared,
                stem: shared,
                leaf: shared,
                ..base.plant
            },
            sweep: SweepDef {
                variant: VariantDef::SingleLayer,
                range: Some(WeibullDef { b: lb, c: lc }),
                ..base.sweep
            },
            ..base
        }
    }

    /// Curve bounding the predawn grid.
    pub fn range_curve(&self) -> WeibullDef {
        self.sweep.range.unwrap_or(self.plant.leaf)
    }
}
