//! van Genuchten soil and the rhizosphere pressure drop.
//!
//! Water reaching a root crosses [`SOIL_SHELLS`] concentric soil shells
//! between the bulk-soil radius and the root surface. Each shell's
//! conductance follows from the saturated conductance `ks`, the van
//! Genuchten relative conductivity at the bulk soil tension, and the shell's
//! share of the logarithmic radial resistance.

use crate::common::{RHIZOSPHERE_RADIUS_RATIO, SOIL_SHELLS, check_positive};
use crate::error::HydraulicsResult;
use xf_core::numeric::clamp_tension;

/// van Genuchten retention parameters (`alpha` in 1/MPa, `n`, `m`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilParameters {
    pub alpha: f64,
    pub n: f64,
    pub m: f64,
}

impl SoilParameters {
    pub fn new(alpha: f64, n: f64, m: f64) -> HydraulicsResult<Self> {
        check_positive(alpha, "van Genuchten alpha")?;
        check_positive(n, "van Genuchten n")?;
        check_positive(m, "van Genuchten m")?;
        Ok(Self { alpha, n, m })
    }

    /// Relative saturation at tension `p`.
    pub fn relative_saturation(&self, p: f64) -> f64 {
        (1.0 / (1.0 + (self.alpha * clamp_tension(p)).powf(self.n))).powf(self.m)
    }

    /// Unsaturated over saturated conductivity at tension `p` (Mualem form).
    pub fn relative_conductivity(&self, p: f64) -> f64 {
        let theta = self.relative_saturation(p);
        theta.sqrt() * (1.0 - (1.0 - theta.powf(1.0 / self.m)).powf(self.m)).powf(2.0)
    }
}

/// Shell radii from the bulk-soil radius inward to the root surface.
fn shell_radii() -> [f64; SOIL_SHELLS + 1] {
    let r_root = 1.0;
    let r_bulk = RHIZOSPHERE_RADIUS_RATIO;
    let mut radii = [0.0; SOIL_SHELLS + 1];
    for (i, r) in radii.iter_mut().enumerate() {
        *r = r_bulk - (r_bulk - r_root) * i as f64 / SOIL_SHELLS as f64;
    }
    radii
}

/// Tension at the root surface when `flow` is drawn through soil of
/// saturated conductance `ks` whose bulk tension is `base`.
///
/// Closed form: the pressure drops of the shells are summed, no iteration.
/// Negative flow (water leaving the root) lowers the tension below `base`.
pub fn soil_pressure(ks: f64, flow: f64, base: f64, soil: &SoilParameters) -> f64 {
    let radii = shell_radii();
    let total_log = (RHIZOSPHERE_RADIUS_RATIO / 1.0).ln();
    let mut dp = 0.0;
    for i in 0..SOIL_SHELLS {
        let k_shell =
            ks * soil.relative_conductivity(base) * total_log / (radii[i] / radii[i + 1]).ln();
        dp += flow / k_shell;
    }
    base + dp
}
