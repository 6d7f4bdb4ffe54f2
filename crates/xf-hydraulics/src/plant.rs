//! Immutable parameter bundle for one plant on one soil.

use crate::common::check_positive;
use crate::error::HydraulicsResult;
use crate::soil::SoilParameters;
use crate::traits::ConductingElement;
use crate::weibull::{Organ, OrganKind, WeibullCurve};
use xf_core::numeric::grid_point;
use xf_core::stats;

/// Vulnerability curves of the three organs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeibullParameters {
    pub root: WeibullCurve,
    pub stem: WeibullCurve,
    pub leaf: WeibullCurve,
}

impl WeibullParameters {
    /// From `[b_root, c_root, b_stem, c_stem, b_leaf, c_leaf]`.
    pub fn from_array(values: [f64; 6]) -> HydraulicsResult<Self> {
        Ok(Self {
            root: WeibullCurve::new(values[0], values[1])?,
            stem: WeibullCurve::new(values[2], values[3])?,
            leaf: WeibullCurve::new(values[4], values[5])?,
        })
    }
}

/// Saturated conductances of the three organs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxConductances {
    pub root: f64,
    pub stem: f64,
    pub leaf: f64,
}

impl MaxConductances {
    pub fn new(root: f64, stem: f64, leaf: f64) -> HydraulicsResult<Self> {
        check_positive(root, "root kmax")?;
        check_positive(stem, "stem kmax")?;
        check_positive(leaf, "leaf kmax")?;
        Ok(Self { root, stem, leaf })
    }
}

/// Everything the solvers need to know about the plant and its soil.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantHydraulics {
    pub weibull: WeibullParameters,
    pub kmax: MaxConductances,
    /// Saturated soil conductance of the whole root zone
    pub k_soil: f64,
    pub soil: SoilParameters,
}

impl PlantHydraulics {
    pub fn new(
        weibull: WeibullParameters,
        kmax: MaxConductances,
        k_soil: f64,
        soil: SoilParameters,
    ) -> HydraulicsResult<Self> {
        check_positive(k_soil, "soil conductance")?;
        Ok(Self {
            weibull,
            kmax,
            k_soil,
            soil,
        })
    }

    pub fn root(&self) -> Organ {
        Organ::from_validated(OrganKind::Root, self.weibull.root, self.kmax.root)
    }

    pub fn stem(&self) -> Organ {
        Organ::from_validated(OrganKind::Stem, self.weibull.stem, self.kmax.stem)
    }

    pub fn leaf(&self) -> Organ {
        Organ::from_validated(OrganKind::Leaf, self.weibull.leaf, self.kmax.leaf)
    }

    /// Leaf tension at which the pathway is considered fully cavitated.
    pub fn critical_pressure(&self) -> f64 {
        self.weibull.leaf.critical_pressure()
    }

    /// Largest share of whole-pathway resistance held by the soil, over 101
    /// evenly spaced tensions from 0 to the critical pressure.
    ///
    /// Every element is evaluated at the same tension, so this describes how
    /// soil-limited the plant can become rather than any steady state.
    pub fn max_soil_resistance_fraction(&self) -> f64 {
        let p_crit = self.critical_pressure();
        let (root, stem, leaf) = (self.root(), self.stem(), self.leaf());
        let fractions: Vec<f64> = (0..=100)
            .map(|i| {
                let p = grid_point(0.0, p_crit, i, 100);
                let r_soil = 1.0 / (self.k_soil * self.soil.relative_conductivity(p));
                let r_plant =
                    1.0 / root.conductance(p) + 1.0 / stem.conductance(p) + 1.0 / leaf.conductance(p);
                r_soil / (r_plant + r_soil)
            })
            .collect();
        stats::maximum(&fractions).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_plant(k_soil: f64) -> PlantHydraulics {
        PlantHydraulics::new(
            WeibullParameters::from_array([1.7, 3.0, 2.0, 3.0, 1.3, 3.0]).unwrap(),
            MaxConductances::new(20.0, 40.0, 40.0).unwrap(),
            k_soil,
            SoilParameters::new(602.0419, 1.48, 0.324324).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn critical_pressure_follows_the_leaf() {
        let plant = reference_plant(2.07e12);
        assert!((plant.critical_pressure() - 2.475_838_621_9).abs() < 1e-9);
    }

    #[test]
    fn organs_carry_their_parameters() {
        let plant = reference_plant(2.07e12);
        assert_eq!(plant.root().kmax(), 20.0);
        assert_eq!(plant.stem().curve.b, 2.0);
        assert_eq!(plant.leaf().name(), "leaf");
    }

    #[test]
    fn soil_share_grows_as_soil_conductance_falls() {
        let wet = reference_plant(2.07e12).max_soil_resistance_fraction();
        let poor = reference_plant(1e3).max_soil_resistance_fraction();
        assert!((0.0..=1.0).contains(&wet));
        assert!(poor > wet);
    }

    #[test]
    fn non_positive_soil_conductance_is_rejected() {
        let plant = reference_plant(1.0);
        assert!(PlantHydraulics::new(plant.weibull, plant.kmax, 0.0, plant.soil).is_err());
    }
}
