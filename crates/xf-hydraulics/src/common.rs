//! Shared constants and checks for conductance models.

use crate::error::{HydraulicsError, HydraulicsResult};
use xf_core::numeric::{ensure_positive, grid_point};

/// Segments of the trapezoidal grid used to integrate conductance over tension.
pub const INTEGRATION_SEGMENTS: usize = 30;

/// Concentric shells between the root surface and the bulk soil.
pub const SOIL_SHELLS: usize = 10;

/// Bulk-soil radius over root-surface radius.
pub const RHIZOSPHERE_RADIUS_RATIO: f64 = 10.0;

/// Saturated over residual conductance at which an organ counts as fully
/// cavitated (conductance down to 1/1000).
pub const CRITICAL_CONDUCTANCE_RATIO: f64 = 1000.0;

/// Most soil layers a root profile may span.
pub const MAX_ROOT_LAYERS: usize = 20;

/// Ensure a parameter is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> HydraulicsResult<f64> {
    ensure_positive(value, what).map_err(|_| HydraulicsError::NonPhysical { what })
}

/// Composite trapezoidal integral of `k` from `p1` to `p2` over a fixed grid
/// of [`INTEGRATION_SEGMENTS`] segments.
///
/// Reversed bounds give a negative integral; equal bounds give exactly zero.
pub fn integrate_tension<K: Fn(f64) -> f64>(k: K, p1: f64, p2: f64) -> f64 {
    let n = INTEGRATION_SEGMENTS;
    let dp = (p2 - p1) / n as f64;
    let mut sum = 0.0;
    for i in 0..=n {
        let weight = if i == 0 || i == n { 0.5 } else { 1.0 };
        sum += k(grid_point(p1, p2, i, n)) * weight * dp;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trapezoid_is_exact_for_linear_integrands() {
        let area = integrate_tension(|p| 2.0 * p + 1.0, 0.0, 3.0);
        assert!((area - 12.0).abs() < 1e-12);
    }

    #[test]
    fn reversed_bounds_flip_sign() {
        let fwd = integrate_tension(|p| p * p, 0.5, 2.0);
        let rev = integrate_tension(|p| p * p, 2.0, 0.5);
        assert!((fwd + rev).abs() < 1e-12);
    }

    #[test]
    fn check_positive_rejects_bad_values() {
        assert!(check_positive(1.0, "x").is_ok());
        assert!(check_positive(0.0, "x").is_err());
        assert!(check_positive(f64::NAN, "x").is_err());
    }
}
