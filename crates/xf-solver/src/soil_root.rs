//! Root uptake through the rhizosphere.
//!
//! The unknown is the tension at the root surface. Given it, flow through the
//! root xylem follows from the root's Weibull curve, and the soil side must
//! deliver that same flow; [`soil_pressure`] gives the surface tension the
//! soil needs to do so. The residual `p - soil_pressure(flow_root(p))` is
//! driven to zero by [`newton_solve`].

use crate::estimate::{FlowEstimate, PressureEstimate};
use crate::error::SolverResult;
use crate::newton::{NewtonConfig, newton_solve};
use xf_core::numeric::clamp_tension;
use xf_hydraulics::{
    ConductingElement, PlantHydraulics, RootLayer, RootLayerProfile, WeibullCurve, soil_pressure,
};

/// Flow from bulk soil at `p_soil` to a root system at `p_root`.
///
/// Exactly zero when `p_root <= p_soil`: a single soil column never receives
/// water back from the plant.
pub fn soil_root_flow(
    plant: &PlantHydraulics,
    p_soil: f64,
    p_root: f64,
) -> SolverResult<FlowEstimate> {
    let p_soil = clamp_tension(p_soil);
    let p_root = clamp_tension(p_root);
    if p_root <= p_soil {
        return Ok(FlowEstimate::no_gradient());
    }

    let root = plant.root();
    let residual = |p: f64| -> SolverResult<f64> {
        let flow = root.flow(p, p_root);
        Ok(p - soil_pressure(plant.k_soil, flow, p_soil, &plant.soil))
    };
    let config = NewtonConfig::labelled("soil-root rhizosphere")
        .bounds(p_soil, p_root)
        .step((p_root - p_soil) * 1e-6);
    let solve = newton_solve(p_soil, residual, &config)?;

    Ok(FlowEstimate::from_solve(root.flow(solve.x, p_root), &solve))
}

/// Net exchange between one layer and a root zone at `p_root`.
///
/// Negative when the layer is drier than the roots and takes water back.
fn layer_exchange(
    plant: &PlantHydraulics,
    curve: &WeibullCurve,
    layer: &RootLayer,
    p_root: f64,
) -> SolverResult<FlowEstimate> {
    let p_soil = layer.soil_pressure;
    if p_root == p_soil {
        return Ok(FlowEstimate::no_gradient());
    }

    let root_flow = |p: f64| layer.k_root * curve.integrated_flow(p, p_root);
    let residual = |p: f64| -> SolverResult<f64> {
        Ok(p - soil_pressure(layer.k_soil, root_flow(p), p_soil, &plant.soil))
    };
    let config =
        NewtonConfig::labelled("soil-root layer").bounds(p_soil.min(p_root), p_soil.max(p_root));
    let solve = newton_solve(p_soil, residual, &config)?;

    Ok(FlowEstimate::from_solve(root_flow(solve.x), &solve))
}

/// Total uptake over every layer of `profile` for a root zone at `p_root`.
///
/// Layers are solved one after another and do not interact; the reported
/// iteration count is the largest of any layer.
pub fn soil_root_flow_multi(
    plant: &PlantHydraulics,
    profile: &RootLayerProfile,
    p_root: f64,
) -> SolverResult<FlowEstimate> {
    let p_root = clamp_tension(p_root);
    let curve = plant.weibull.root;
    let mut total = FlowEstimate::no_gradient();
    for layer in profile.layers() {
        let exchange = layer_exchange(plant, &curve, layer, p_root)?;
        total.flow += exchange.flow;
        total.converged &= exchange.converged;
        total.iterations = total.iterations.max(exchange.iterations);
    }
    Ok(total)
}

/// Root-zone tension at which the layers exchange water with zero net
/// uptake.
///
/// Always lies between the wettest and driest layer.
pub fn predawn_pressure(
    plant: &PlantHydraulics,
    profile: &RootLayerProfile,
) -> SolverResult<PressureEstimate> {
    let lo = profile.min_soil_pressure();
    let hi = profile.max_soil_pressure();
    let residual =
        |p: f64| -> SolverResult<f64> { Ok(soil_root_flow_multi(plant, profile, p)?.flow) };
    let config = NewtonConfig::labelled("predawn pressure").bounds(lo, hi);
    let solve = newton_solve(lo, residual, &config)?;

    let inner = soil_root_flow_multi(plant, profile, solve.x)?;
    let mut estimate = PressureEstimate::from_solve(&solve);
    estimate.converged &= inner.converged;
    tracing::debug!(
        predawn = estimate.pressure,
        iterations = estimate.iterations,
        converged = estimate.converged,
        "predawn pressure"
    );
    Ok(estimate)
}
