//! Numerical policy shared by every solver in the crate.
//!
//! Kept in one place so the tolerances can be audited and tested apart from
//! any single solver.

/// Residual magnitude below which a Newton iteration has converged.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-6;

/// Newton updates allowed before a solve is reported as unconverged.
pub const MAX_ITERATIONS: usize = 100;

/// Forward-difference step for Newton derivatives (MPa).
pub const DERIVATIVE_STEP: f64 = 1e-6;

/// Finite-difference slopes smaller than this in magnitude are treated as zero.
pub const MIN_SLOPE: f64 = 1e-12;

/// Samples in a supply curve, from the sweep start to the critical pressure.
pub const SUPPLY_CURVE_POINTS: usize = 101;

/// Step for supply-curve slopes when soil and roots are ignored (MPa).
pub const STEM_LEAF_SLOPE_STEP: f64 = 1e-3;

/// Single-layer supply-curve slope step, as a fraction of the critical pressure.
pub const SINGLE_LAYER_SLOPE_FRACTION: f64 = 1e-3;

/// Multi-layer supply-curve slope step, as a fraction of the swept span.
pub const MULTI_LAYER_SLOPE_FRACTION: f64 = 4e-3;

/// Derivative step when solving for the leaf pressure meeting a demand (MPa).
pub const DEMAND_DERIVATIVE_STEP: f64 = 1e-4;

/// Step for the local slope at a demand-limited leaf pressure (MPa).
pub const REGULATION_SLOPE_STEP: f64 = 1e-3;
