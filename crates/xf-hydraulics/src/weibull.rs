//! Weibull vulnerability curves and the xylem organs built on them.

use crate::common::{CRITICAL_CONDUCTANCE_RATIO, check_positive, integrate_tension};
use crate::error::HydraulicsResult;
use crate::traits::ConductingElement;
use xf_core::numeric::clamp_tension;

/// Fraction of saturated conductance left at tension `p`: `exp(-(p/b)^c)`.
///
/// Negative tensions are treated as zero tension.
#[inline]
pub fn conductance_fraction(b: f64, c: f64, p: f64) -> f64 {
    (-(clamp_tension(p) / b).powf(c)).exp()
}

/// Integral of [`conductance_fraction`] from `p1` to `p2`, i.e. the flow
/// through an organ of unit saturated conductance.
pub fn integrated_flow(b: f64, c: f64, p1: f64, p2: f64) -> f64 {
    integrate_tension(|p| conductance_fraction(b, c, p), p1, p2)
}

/// Scale (`b`, MPa) and shape (`c`) of a Weibull vulnerability curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeibullCurve {
    pub b: f64,
    pub c: f64,
}

impl WeibullCurve {
    pub fn new(b: f64, c: f64) -> HydraulicsResult<Self> {
        check_positive(b, "weibull b")?;
        check_positive(c, "weibull c")?;
        Ok(Self { b, c })
    }

    pub fn fraction(&self, p: f64) -> f64 {
        conductance_fraction(self.b, self.c, p)
    }

    pub fn integrated_flow(&self, p1: f64, p2: f64) -> f64 {
        integrated_flow(self.b, self.c, p1, p2)
    }

    /// Tension at which conductance has fallen to 1/1000 of saturation:
    /// `b * ln(1000)^(1/c)`.
    pub fn critical_pressure(&self) -> f64 {
        self.b * CRITICAL_CONDUCTANCE_RATIO.ln().powf(1.0 / self.c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrganKind {
    Root,
    Stem,
    Leaf,
}

impl OrganKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrganKind::Root => "root",
            OrganKind::Stem => "stem",
            OrganKind::Leaf => "leaf",
        }
    }
}

/// A xylem organ: a vulnerability curve scaled by a saturated conductance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Organ {
    pub kind: OrganKind,
    pub curve: WeibullCurve,
    kmax: f64,
}

impl Organ {
    pub fn new(kind: OrganKind, curve: WeibullCurve, kmax: f64) -> HydraulicsResult<Self> {
        check_positive(kmax, "organ kmax")?;
        Ok(Self { kind, curve, kmax })
    }

    /// For parameters already validated by their owning bundle.
    pub(crate) fn from_validated(kind: OrganKind, curve: WeibullCurve, kmax: f64) -> Self {
        Self { kind, curve, kmax }
    }
}

impl ConductingElement for Organ {
    fn name(&self) -> &str {
        self.kind.as_str()
    }

    fn kmax(&self) -> f64 {
        self.kmax
    }

    fn conductance_fraction(&self, p: f64) -> f64 {
        self.curve.fraction(p)
    }

    // Same grid as `integrated_flow`, scaled afterwards.
    fn flow(&self, upstream: f64, downstream: f64) -> f64 {
        self.curve.integrated_flow(upstream, downstream) * self.kmax
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturated_at_zero_tension() {
        assert_eq!(conductance_fraction(1.7, 3.0, 0.0), 1.0);
        assert_eq!(conductance_fraction(1.7, 3.0, -0.4), 1.0);
    }

    #[test]
    fn fraction_at_b_is_one_over_e() {
        let f = conductance_fraction(2.0, 3.0, 2.0);
        assert!((f - (-1.0f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn zero_width_interval_carries_no_flow() {
        assert_eq!(integrated_flow(1.3, 3.0, 0.8, 0.8), 0.0);
    }

    #[test]
    fn critical_pressure_hits_one_thousandth() {
        let curve = WeibullCurve::new(1.3, 3.0).unwrap();
        let p_crit = curve.critical_pressure();
        assert!((curve.fraction(p_crit) - 1e-3).abs() < 1e-12);
    }

    #[test]
    fn curve_rejects_non_positive_parameters() {
        assert!(WeibullCurve::new(0.0, 3.0).is_err());
        assert!(WeibullCurve::new(1.0, -1.0).is_err());
        assert!(WeibullCurve::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn organ_flow_scales_with_kmax() {
        let curve = WeibullCurve::new(2.0, 3.0).unwrap();
        let one = Organ::new(OrganKind::Stem, curve, 1.0).unwrap();
        let forty = Organ::new(OrganKind::Stem, curve, 40.0).unwrap();
        assert!((forty.flow(0.1, 0.9) - 40.0 * one.flow(0.1, 0.9)).abs() < 1e-12);
        assert_eq!(forty.name(), "stem");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn fraction_is_bounded_and_decreasing(
            b in 0.1_f64..10.0,
            c in 0.5_f64..8.0,
            p in 0.0_f64..20.0,
            dp in 1e-3_f64..5.0,
        ) {
            let lo = conductance_fraction(b, c, p);
            let hi = conductance_fraction(b, c, p + dp);
            prop_assert!((0.0..=1.0).contains(&lo));
            prop_assert!(hi <= lo);
        }

        #[test]
        fn flow_over_empty_interval_is_zero(b in 0.1_f64..10.0, c in 0.5_f64..8.0, p in 0.0_f64..10.0) {
            prop_assert_eq!(integrated_flow(b, c, p, p), 0.0);
        }
    }
}
