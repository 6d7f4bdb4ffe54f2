//! Root-layer conductance profile for layered soil.
//!
//! Roots are distributed with depth following a cumulative fraction
//! `Y(d) = 1 - beta^d`. The soil column down to 99.5% of the root mass is cut
//! into layers holding equal root fractions; each layer's share of the root
//! conductance is inversely proportional to its mean transport path (vertical
//! depth plus a lateral term scaled by `alpha`).

use crate::common::{MAX_ROOT_LAYERS, check_positive};
use crate::error::{HydraulicsError, HydraulicsResult};
use std::f64::consts::PI;
use xf_core::numeric::{clamp_tension, ensure_finite};

/// Root mass fraction covered by the layered profile.
const ROOTED_FRACTION: f64 = 0.995;

/// Depth above which `fraction` of the root mass lies.
pub fn root_depth(fraction: f64, beta: f64) -> f64 {
    (1.0 - fraction).ln() / beta.ln()
}

/// Root depth distribution: `beta` in (0, 1) and the lateral path scale `alpha`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootDistribution {
    pub beta: f64,
    pub alpha: f64,
}

impl RootDistribution {
    pub fn new(beta: f64, alpha: f64) -> HydraulicsResult<Self> {
        check_positive(beta, "root beta")?;
        if beta >= 1.0 {
            return Err(HydraulicsError::NonPhysical { what: "root beta" });
        }
        check_positive(alpha, "root alpha")?;
        Ok(Self { beta, alpha })
    }

    /// Share of root conductance held by each of `layers` layers; sums to 1.
    pub fn layer_fractions(&self, layers: usize) -> HydraulicsResult<Vec<f64>> {
        check_layer_count(layers)?;
        let per_layer = ROOTED_FRACTION / layers as f64;
        let mut path_lengths = Vec::with_capacity(layers);
        let mut upper = 0.0;
        for i in 0..layers {
            let lower = root_depth(per_layer * (i + 1) as f64, self.beta);
            let thickness = lower - upper;
            let vertical = root_depth(per_layer * (0.5 + i as f64), self.beta);
            let lateral = per_layer / thickness / (2.0 * PI) * self.alpha;
            path_lengths.push(vertical + lateral);
            upper = lower;
        }
        let total: f64 = path_lengths.iter().map(|l| 1.0 / l).sum();
        Ok(path_lengths.iter().map(|l| 1.0 / l / total).collect())
    }
}

fn check_layer_count(layers: usize) -> HydraulicsResult<()> {
    if layers == 0 || layers > MAX_ROOT_LAYERS {
        return Err(HydraulicsError::LayerCount {
            count: layers,
            max: MAX_ROOT_LAYERS,
        });
    }
    Ok(())
}

/// One soil layer as seen by the roots in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootLayer {
    /// Saturated root conductance of the layer
    pub k_root: f64,
    /// Saturated soil conductance of the layer
    pub k_soil: f64,
    /// Bulk soil tension of the layer (MPa)
    pub soil_pressure: f64,
}

/// Ordered layers, shallowest first. Fixed for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RootLayerProfile {
    layers: Vec<RootLayer>,
}

impl RootLayerProfile {
    pub fn new(layers: Vec<RootLayer>) -> HydraulicsResult<Self> {
        check_layer_count(layers.len())?;
        for layer in &layers {
            check_positive(layer.k_root, "layer root conductance")?;
            check_positive(layer.k_soil, "layer soil conductance")?;
            ensure_finite(layer.soil_pressure, "layer soil pressure")?;
        }
        let layers = layers
            .into_iter()
            .map(|l| RootLayer {
                soil_pressure: clamp_tension(l.soil_pressure),
                ..l
            })
            .collect();
        Ok(Self { layers })
    }

    /// Split the plant's root and soil conductances over layers: roots by
    /// the distribution's shares, soil evenly.
    pub fn from_distribution(
        distribution: &RootDistribution,
        kmax_root: f64,
        k_soil: f64,
        soil_pressures: &[f64],
    ) -> HydraulicsResult<Self> {
        let fractions = distribution.layer_fractions(soil_pressures.len())?;
        let k_soil_layer = k_soil / soil_pressures.len() as f64;
        let layers = fractions
            .iter()
            .zip(soil_pressures)
            .map(|(f, p)| RootLayer {
                k_root: f * kmax_root,
                k_soil: k_soil_layer,
                soil_pressure: *p,
            })
            .collect();
        Self::new(layers)
    }

    pub fn layers(&self) -> &[RootLayer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Tension of the wettest layer.
    pub fn min_soil_pressure(&self) -> f64 {
        self.layers
            .iter()
            .map(|l| l.soil_pressure)
            .fold(f64::INFINITY, f64::min)
    }

    /// Tension of the driest layer.
    pub fn max_soil_pressure(&self) -> f64 {
        self.layers
            .iter()
            .map(|l| l.soil_pressure)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
