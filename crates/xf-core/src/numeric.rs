use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Require a strictly positive, finite value.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, CoreError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(CoreError::InvalidArg { what })
    }
}

/// Tension magnitudes are non-negative; anything below zero is pinned to zero.
#[inline]
pub fn clamp_tension(p: Real) -> Real {
    if p < 0.0 { 0.0 } else { p }
}

/// Evenly spaced point `i` of `segments` between `start` and `end`.
///
/// Evaluated as `start + (end - start) * i / segments` so every grid in the
/// workspace lands on bit-identical abscissae.
#[inline]
pub fn grid_point(start: Real, end: Real, i: usize, segments: usize) -> Real {
    start + (end - start) * i as Real / segments as Real
}
