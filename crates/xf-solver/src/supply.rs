//! Supply curves: supplied flow and its slope over a sweep of leaf tension.
//!
//! A curve is sampled at [`SUPPLY_CURVE_POINTS`] evenly spaced leaf tensions
//! from the path's start (zero flow) to its critical pressure. Samples are
//! independent and are evaluated in parallel; the result does not depend on
//! scheduling.

use crate::error::{SolverError, SolverResult};
use crate::policy::SUPPLY_CURVE_POINTS;
use crate::whole_plant::FlowPath;
use rayon::prelude::*;
use xf_core::numeric::grid_point;

/// One sample of a supply curve.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SupplyPoint {
    /// Leaf tension (MPa)
    pub leaf_pressure: f64,
    /// Whole-plant flow at `leaf_pressure`
    pub flow: f64,
    /// Forward-difference d(flow)/d(leaf_pressure): whole-plant conductance
    pub slope: f64,
}

/// Fixed-length supply curve, ordered by increasing leaf tension.
///
/// Index 0 is the unstressed state at the sweep start. Built once per soil
/// state, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplyCurve {
    points: [SupplyPoint; SUPPLY_CURVE_POINTS],
    unconverged_points: usize,
}

impl SupplyCurve {
    /// Wrap externally produced samples; they must number exactly
    /// [`SUPPLY_CURVE_POINTS`], be finite and have non-decreasing pressure.
    pub fn from_points(points: &[SupplyPoint]) -> SolverResult<Self> {
        let points: [SupplyPoint; SUPPLY_CURVE_POINTS] =
            points.try_into().map_err(|_| SolverError::InvalidInput {
                what: format!(
                    "supply curve needs {SUPPLY_CURVE_POINTS} points, got {}",
                    points.len()
                ),
            })?;
        let finite = points
            .iter()
            .all(|p| p.leaf_pressure.is_finite() && p.flow.is_finite() && p.slope.is_finite());
        if !finite {
            return Err(SolverError::InvalidInput {
                what: "supply curve has non-finite samples".into(),
            });
        }
        if points
            .windows(2)
            .any(|w| w[1].leaf_pressure < w[0].leaf_pressure)
        {
            return Err(SolverError::InvalidInput {
                what: "supply curve leaf pressures must not decrease".into(),
            });
        }
        Ok(Self {
            points,
            unconverged_points: 0,
        })
    }

    pub fn points(&self) -> &[SupplyPoint] {
        &self.points
    }

    /// The sweep start.
    pub fn first(&self) -> &SupplyPoint {
        &self.points[0]
    }

    /// The critical-pressure end.
    pub fn last(&self) -> &SupplyPoint {
        &self.points[SUPPLY_CURVE_POINTS - 1]
    }

    pub fn len(&self) -> usize {
        SUPPLY_CURVE_POINTS
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Samples whose flow solve (or slope probe) hit an iteration cap.
    pub fn unconverged_points(&self) -> usize {
        self.unconverged_points
    }

    pub fn is_converged(&self) -> bool {
        self.unconverged_points == 0
    }
}

/// Sample `path` from its start pressure to its critical pressure.
///
/// Fails if the start is not below the critical pressure or if any flow
/// solve diverges. Samples that merely hit an iteration cap are kept and
/// counted in [`SupplyCurve::unconverged_points`].
pub fn build_supply_curve(path: &dyn FlowPath) -> SolverResult<SupplyCurve> {
    let start = path.start_pressure();
    let p_crit = path.critical_pressure();
    if !(start.is_finite() && p_crit.is_finite() && start < p_crit) {
        return Err(SolverError::InvalidInput {
            what: format!(
                "{} sweep start {start} is not below the critical pressure {p_crit}",
                path.name()
            ),
        });
    }
    let step = path.slope_step();
    let segments = SUPPLY_CURVE_POINTS - 1;

    let samples = (0..SUPPLY_CURVE_POINTS)
        .into_par_iter()
        .map(|i| {
            let p = grid_point(start, p_crit, i, segments);
            let here = path.flow(p)?;
            let ahead = path.flow(p + step)?;
            let point = SupplyPoint {
                leaf_pressure: p,
                flow: here.flow,
                slope: (ahead.flow - here.flow) / step,
            };
            Ok((point, here.converged && ahead.converged))
        })
        .collect::<SolverResult<Vec<_>>>()?;

    let mut points = [SupplyPoint::default(); SUPPLY_CURVE_POINTS];
    let mut unconverged_points = 0;
    for (slot, (point, converged)) in points.iter_mut().zip(samples) {
        *slot = point;
        if !converged {
            unconverged_points += 1;
        }
    }
    if unconverged_points > 0 {
        tracing::debug!(
            path = path.name(),
            start,
            unconverged_points,
            "supply curve has unconverged samples"
        );
    }

    Ok(SupplyCurve {
        points,
        unconverged_points,
    })
}
