//! Predawn sweep execution.
//!
//! One scenario per predawn soil pressure on an even grid from zero up to
//! (but excluding) the range curve's critical pressure. Each scenario builds
//! its own supply curve and reports either the regulated maximum flow or,
//! when a demand is configured, the canopy conductance under that demand.
//! Scenarios are independent and run in parallel; records come back in grid
//! order.

use rayon::prelude::*;
use serde::Serialize;
use xf_core::curve::{CurvePoint, argmax_y, has_turning_point, insert_sorted};
use xf_core::stats;
use xf_core::timing::Timer;
use xf_core::units::{Pressure, mpa, to_mpa};
use xf_project::schema::SimulationConfig;
use xf_solver::{
    FlowPath, MultiLayerPath, SingleLayerPath, StemLeafPath, SupplyVariant, build_supply_curve,
    find_regulation, max_regulated_flow, transpiration_under_demand,
};

use crate::compile::{SweepRuntime, compile_sweep};
use crate::error::{AppError, AppResult};

/// Outcome of one predawn scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioRecord {
    pub index: usize,
    /// Predawn soil pressure (MPa)
    pub predawn: f64,
    /// Reported value, scaled; NaN when the scenario failed
    pub value: f64,
    /// Leaf pressure at the start of the supply curve (MPa)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_pressure: Option<f64>,
    /// Regulation pressure (x) and exact flow there (y)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulation: Option<CurvePoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regime: Option<&'static str>,
    pub converged: bool,
    pub unconverged_points: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScenarioRecord {
    fn failed(index: usize, predawn: f64, error: &AppError) -> Self {
        Self {
            index,
            predawn,
            value: f64::NAN,
            start_pressure: None,
            regulation: None,
            regime: None,
            converged: false,
            unconverged_points: 0,
            error: Some(error.to_string()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Statistics over the scenarios that produced a value.
#[derive(Debug, Clone, Serialize)]
pub struct SweepSummary {
    pub median: f64,
    pub minimum: f64,
    pub maximum: f64,
    /// Predawn pressure (x) and value (y) of the largest value
    pub peak: CurvePoint,
    /// True if the value rises and falls again along the sweep
    pub non_monotonic: bool,
}

/// All scenarios of one sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepOutcome {
    pub variant: &'static str,
    /// What `value` holds: `regulated_flow` or `canopy_conductance`
    pub quantity: &'static str,
    pub records: Vec<ScenarioRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SweepSummary>,
    pub failed: usize,
    pub unconverged: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_s: Option<f64>,
}

/// Predawn pressures `p_crit / n * i` for `i` in `0..n`.
pub fn predawn_grid(p_crit: f64, scenarios: usize) -> Vec<Pressure> {
    (0..scenarios)
        .map(|i| mpa(p_crit / scenarios as f64 * i as f64))
        .collect()
}

struct PathOutcome {
    start_pressure: f64,
    regulation: CurvePoint,
    value: f64,
    regime: Option<&'static str>,
    converged: bool,
    unconverged_points: usize,
}

fn evaluate_path(runtime: &SweepRuntime, path: &dyn FlowPath) -> AppResult<PathOutcome> {
    let curve = build_supply_curve(path)?;
    let regulation = find_regulation(&curve)?;
    let e_reg = max_regulated_flow(path, &curve)?;

    let (value, regime, converged) = match runtime.demand {
        Some((gmax, vpd)) => {
            let t = transpiration_under_demand(path, &curve, gmax, vpd)?;
            (t.conductance, Some(t.regime.as_str()), t.converged)
        }
        None => (e_reg.flow, None, e_reg.converged),
    };

    Ok(PathOutcome {
        start_pressure: path.start_pressure(),
        regulation: CurvePoint::new(regulation.pressure, e_reg.flow),
        value,
        regime,
        converged: converged && curve.is_converged(),
        unconverged_points: curve.unconverged_points(),
    })
}

/// Run a single scenario at `predawn`.
pub fn evaluate_scenario(
    runtime: &SweepRuntime,
    index: usize,
    predawn: Pressure,
) -> AppResult<ScenarioRecord> {
    let plant = &runtime.plant;
    let p = to_mpa(predawn);
    let outcome = match runtime.variant {
        SupplyVariant::StemLeaf => evaluate_path(runtime, &StemLeafPath::new(plant, p))?,
        SupplyVariant::SingleLayer => evaluate_path(runtime, &SingleLayerPath::new(plant, p))?,
        SupplyVariant::MultiLayer => {
            let zone = runtime.root_zone.as_ref().ok_or_else(|| {
                AppError::InvalidInput("multi-layer scenario without a root zone".to_string())
            })?;
            let profile = zone.profile_at(plant, predawn)?;
            let path = MultiLayerPath::new(plant, &profile)?;
            let mut outcome = evaluate_path(runtime, &path)?;
            outcome.converged &= path.predawn().converged;
            outcome
        }
    };

    Ok(ScenarioRecord {
        index,
        predawn: p,
        value: outcome.value * runtime.output_scale,
        start_pressure: Some(outcome.start_pressure),
        regulation: Some(outcome.regulation),
        regime: outcome.regime,
        converged: outcome.converged,
        unconverged_points: outcome.unconverged_points,
        error: None,
    })
}

fn summarize(records: &[ScenarioRecord]) -> AppResult<Option<SweepSummary>> {
    let mut response = Vec::with_capacity(records.len());
    for r in records.iter().filter(|r| r.value.is_finite()) {
        insert_sorted(&mut response, CurvePoint::new(r.predawn, r.value))?;
    }
    if response.is_empty() {
        return Ok(None);
    }
    let values: Vec<f64> = response.iter().map(|p| p.y).collect();
    Ok(Some(SweepSummary {
        median: stats::median(&values)?,
        minimum: stats::minimum(&values)?,
        maximum: stats::maximum(&values)?,
        peak: response[argmax_y(&response)?],
        non_monotonic: has_turning_point(&values),
    }))
}

/// Run every scenario of a compiled sweep.
///
/// A scenario that fails is logged and recorded with a NaN value; the sweep
/// itself only fails on errors outside any scenario.
pub fn run_sweep(runtime: &SweepRuntime) -> AppResult<SweepOutcome> {
    let timer = Timer::start("predawn sweep");
    let grid = predawn_grid(runtime.range_critical_pressure, runtime.scenarios);
    tracing::info!(
        variant = runtime.variant.as_str(),
        scenarios = grid.len(),
        demand = runtime.demand.is_some(),
        "running predawn sweep"
    );

    let records: Vec<ScenarioRecord> = grid
        .par_iter()
        .enumerate()
        .map(|(index, predawn)| {
            evaluate_scenario(runtime, index, *predawn).unwrap_or_else(|err| {
                tracing::warn!(
                    scenario = index,
                    predawn = to_mpa(*predawn),
                    error = %err,
                    "scenario failed"
                );
                ScenarioRecord::failed(index, to_mpa(*predawn), &err)
            })
        })
        .collect();

    let failed = records.iter().filter(|r| r.is_failed()).count();
    let unconverged = records
        .iter()
        .filter(|r| !r.is_failed() && !r.converged)
        .count();
    if unconverged > 0 {
        tracing::warn!(
            unconverged,
            "scenarios returned values from solves that hit the iteration cap"
        );
    }
    let summary = summarize(&records)?;
    let elapsed_s = timer.stop_and_log();
    tracing::info!(failed, unconverged, "predawn sweep finished");

    Ok(SweepOutcome {
        variant: runtime.variant.as_str(),
        quantity: if runtime.demand.is_some() {
            "canopy_conductance"
        } else {
            "regulated_flow"
        },
        records,
        summary,
        failed,
        unconverged,
        elapsed_s,
    })
}

/// Compile and run a configuration.
pub fn run_config(config: &SimulationConfig) -> AppResult<SweepOutcome> {
    let runtime = compile_sweep(config)?;
    run_sweep(&runtime)
}
