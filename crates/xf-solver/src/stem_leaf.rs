//! Stem junction equilibrium between root collar and leaf.

use crate::estimate::FlowEstimate;
use crate::error::SolverResult;
use crate::newton::{NewtonConfig, newton_solve};
use xf_core::numeric::clamp_tension;
use xf_hydraulics::{ConductingElement, PlantHydraulics};

/// Flow through stem and leaf in series, from roots at `p_root` to leaves at
/// `p_leaf`.
///
/// Solves for the junction tension at which stem and leaf carry the same
/// flow and reports the mean of the two at the final iterate. Exactly zero
/// when `p_leaf <= p_root`.
pub fn stem_leaf_flow(
    plant: &PlantHydraulics,
    p_root: f64,
    p_leaf: f64,
) -> SolverResult<FlowEstimate> {
    let p_root = clamp_tension(p_root);
    let p_leaf = clamp_tension(p_leaf);
    if p_leaf <= p_root {
        return Ok(FlowEstimate::no_gradient());
    }

    let (stem, leaf) = (plant.stem(), plant.leaf());
    let residual =
        |p: f64| -> SolverResult<f64> { Ok(stem.flow(p_root, p) - leaf.flow(p, p_leaf)) };
    let config = NewtonConfig::labelled("stem-leaf junction").bounds(p_root, p_leaf);
    let solve = newton_solve(p_root, residual, &config)?;

    let flow = 0.5 * (stem.flow(p_root, solve.x) + leaf.flow(solve.x, p_leaf));
    Ok(FlowEstimate::from_solve(flow, &solve))
}
