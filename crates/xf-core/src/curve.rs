//! Helpers for small (x, y) curves kept sorted by x.

use crate::error::{CoreError, CoreResult};
use crate::stats::MAX_SERIES_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

impl CurvePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Insert `point` ahead of the first sample with a larger x.
///
/// Ties keep insertion order: a point whose x equals an existing sample's
/// lands after it.
pub fn insert_sorted(curve: &mut Vec<CurvePoint>, point: CurvePoint) -> CoreResult<()> {
    if curve.len() >= MAX_SERIES_LEN {
        return Err(CoreError::Capacity {
            what: "sorted curve",
            len: curve.len() + 1,
            capacity: MAX_SERIES_LEN,
        });
    }
    let at = curve
        .iter()
        .position(|p| point.x < p.x)
        .unwrap_or(curve.len());
    curve.insert(at, point);
    Ok(())
}

/// True when consecutive differences change sign anywhere in `values`,
/// i.e. the series has an interior peak or trough.
pub fn has_turning_point(values: &[f64]) -> bool {
    values
        .windows(3)
        .any(|w| (w[1] - w[0]) * (w[2] - w[1]) < 0.0)
}

/// Index of the first sample with the largest y.
pub fn argmax_y(curve: &[CurvePoint]) -> CoreResult<usize> {
    if curve.is_empty() {
        return Err(CoreError::Empty { what: "curve" });
    }
    let mut best = 0;
    for (i, p) in curve.iter().enumerate().skip(1) {
        if p.y > curve[best].y {
            best = i;
        }
    }
    Ok(best)
}
