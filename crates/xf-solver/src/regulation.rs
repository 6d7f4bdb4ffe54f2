//! Stomatal regulation on a supply curve.
//!
//! The regulation point is found by projecting each sample's conductance
//! onto the secant through the curve's start:
//!
//! `p_reg(i) = slope(i) / slope(0) * (p(i) - p(0)) + p(0)`
//!
//! `p_reg` rises while conductance loss is still paid back by the extra
//! gradient and falls once it no longer is. The regulation pressure is the
//! last value before the first fall.

use crate::estimate::{FlowEstimate, PressureEstimate};
use crate::error::{SolverError, SolverResult};
use crate::newton::{NewtonConfig, newton_solve};
use crate::policy::{DEMAND_DERIVATIVE_STEP, REGULATION_SLOPE_STEP};
use crate::supply::SupplyCurve;
use crate::whole_plant::FlowPath;

/// Where regulation sets in on a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegulationPoint {
    /// Curve index of the last rising `p_reg`
    pub index: usize,
    /// Projected regulation pressure `p_reg(index)` (MPa)
    pub pressure: f64,
}

fn reference_slope(curve: &SupplyCurve) -> SolverResult<f64> {
    let s0 = curve.first().slope;
    if !(s0.is_finite() && s0 > 0.0) {
        return Err(SolverError::InvalidInput {
            what: format!("supply curve starts with non-positive conductance {s0}"),
        });
    }
    Ok(s0)
}

fn project(curve: &SupplyCurve, s0: f64, slope: f64, pressure: f64) -> f64 {
    let p0 = curve.first().leaf_pressure;
    slope / s0 * (pressure - p0) + p0
}

/// Walk `curve` from its start until the projected pressure first falls.
///
/// A curve whose projection never falls regulates at its last sample.
pub fn find_regulation(curve: &SupplyCurve) -> SolverResult<RegulationPoint> {
    let s0 = reference_slope(curve)?;
    let mut best = RegulationPoint {
        index: 0,
        pressure: curve.first().leaf_pressure,
    };
    for (index, point) in curve.points().iter().enumerate().skip(1) {
        let pressure = project(curve, s0, point.slope, point.leaf_pressure);
        if pressure >= best.pressure {
            best = RegulationPoint { index, pressure };
        } else {
            break;
        }
    }
    Ok(best)
}

/// Regulation pressure of `curve` (MPa).
pub fn regulation_pressure(curve: &SupplyCurve) -> SolverResult<f64> {
    Ok(find_regulation(curve)?.pressure)
}

/// Flow at the regulation pressure, solved exactly on `path` rather than read
/// from the table.
pub fn max_regulated_flow(path: &dyn FlowPath, curve: &SupplyCurve) -> SolverResult<FlowEstimate> {
    let regulation = find_regulation(curve)?;
    path.flow(regulation.pressure)
}

/// Leaf tension at which `path` supplies `target`, searched between the
/// path's start and its critical pressure.
pub fn leaf_pressure_for_flow(path: &dyn FlowPath, target: f64) -> SolverResult<PressureEstimate> {
    if !(target.is_finite() && target >= 0.0) {
        return Err(SolverError::InvalidInput {
            what: format!("target flow {target} must be finite and non-negative"),
        });
    }
    let start = path.start_pressure();
    let residual = |p: f64| -> SolverResult<f64> { Ok(path.flow(p)?.flow - target) };
    let config = NewtonConfig::labelled("leaf pressure for demand")
        .bounds(start, path.critical_pressure())
        .step(DEMAND_DERIVATIVE_STEP);
    let solve = newton_solve(start, residual, &config)?;

    let mut estimate = PressureEstimate::from_solve(&solve);
    estimate.converged &= path.flow(solve.x)?.converged;
    Ok(estimate)
}

/// What limits transpiration under a given demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemandRegime {
    /// No vapour pressure deficit, no flow
    NoDemand,
    /// Demand meets or exceeds supply at the regulation point
    RegulationLimited,
    /// Demand is met below the regulation point
    DemandLimited,
}

impl DemandRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemandRegime::NoDemand => "no-demand",
            DemandRegime::RegulationLimited => "regulation-limited",
            DemandRegime::DemandLimited => "demand-limited",
        }
    }
}

/// Transpiration delivered under an atmospheric demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transpiration {
    /// Canopy conductance: flow over `vpd / 100`
    pub conductance: f64,
    /// Regulated flow
    pub flow: f64,
    /// Leaf tension the flow was evaluated at (MPa)
    pub leaf_pressure: f64,
    pub regime: DemandRegime,
    /// False if any solve on the way hit an iteration cap
    pub converged: bool,
}

/// Regulated transpiration for maximum stomatal conductance `gmax` and
/// vapour pressure deficit `vpd`.
///
/// Demand is `gmax * vpd / 100`. When it reaches the tabulated flow at the
/// regulation point, the plant transpires at the regulation pressure.
/// Otherwise the leaf tension meeting the demand is solved for and projected
/// onto the regulation secant with its local slope.
pub fn transpiration_under_demand(
    path: &dyn FlowPath,
    curve: &SupplyCurve,
    gmax: f64,
    vpd: f64,
) -> SolverResult<Transpiration> {
    for (value, what) in [(gmax, "gmax"), (vpd, "vpd")] {
        if !(value.is_finite() && value >= 0.0) {
            return Err(SolverError::InvalidInput {
                what: format!("{what} = {value} must be finite and non-negative"),
            });
        }
    }
    if vpd == 0.0 {
        return Ok(Transpiration {
            conductance: 0.0,
            flow: 0.0,
            leaf_pressure: curve.first().leaf_pressure,
            regime: DemandRegime::NoDemand,
            converged: true,
        });
    }

    let vpd_fraction = vpd / 100.0;
    let demand = gmax * vpd_fraction;
    let regulation = find_regulation(curve)?;
    let ceiling = curve.points()[regulation.index].flow;

    let (leaf_pressure, regime, mut converged) = if demand >= ceiling {
        (regulation.pressure, DemandRegime::RegulationLimited, true)
    } else {
        let s0 = reference_slope(curve)?;
        let leaf = leaf_pressure_for_flow(path, demand)?;
        let here = path.flow(leaf.pressure)?;
        let ahead = path.flow(leaf.pressure + REGULATION_SLOPE_STEP)?;
        let slope = (ahead.flow - here.flow) / REGULATION_SLOPE_STEP;
        (
            project(curve, s0, slope, leaf.pressure),
            DemandRegime::DemandLimited,
            leaf.converged && ahead.converged,
        )
    };

    let delivered = path.flow(leaf_pressure)?;
    converged &= delivered.converged;
    Ok(Transpiration {
        conductance: delivered.flow / vpd_fraction,
        flow: delivered.flow,
        leaf_pressure,
        regime,
        converged,
    })
}
