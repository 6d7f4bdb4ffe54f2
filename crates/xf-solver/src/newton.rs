//! Bounded scalar Newton iteration with a finite-difference derivative.
//!
//! Every equilibrium in the crate (rhizosphere, stem junction, root
//! pressure, predawn pressure, demand-limited leaf pressure) is a 1-D root of
//! a residual over a tension interval. They all run through [`newton_solve`]:
//!
//! seed -> evaluate residual -> converged? -> forward-difference slope ->
//! Newton step -> clamp into bounds -> repeat, until the tolerance is met or
//! the iteration cap is reached.
//!
//! Hitting the cap is not an error: the last evaluated iterate is returned
//! with `converged == false`. A vanishing or non-finite slope is an error.

use crate::derivative::forward_difference_from;
use crate::error::{SolverError, SolverResult};
use crate::policy::{CONVERGENCE_TOLERANCE, DERIVATIVE_STEP, MAX_ITERATIONS, MIN_SLOPE};

/// Newton solver configuration.
#[derive(Debug, Clone, Copy)]
pub struct NewtonConfig {
    /// Name of the equilibrium being solved, for diagnostics
    pub label: &'static str,
    /// Maximum Newton updates
    pub max_iterations: usize,
    /// Absolute tolerance on the residual
    pub tolerance: f64,
    /// Forward-difference step for the derivative
    pub derivative_step: f64,
    /// Lower clamp for the iterate
    pub lower: f64,
    /// Upper clamp for the iterate
    pub upper: f64,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            label: "newton",
            max_iterations: MAX_ITERATIONS,
            tolerance: CONVERGENCE_TOLERANCE,
            derivative_step: DERIVATIVE_STEP,
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
        }
    }
}

impl NewtonConfig {
    pub fn labelled(label: &'static str) -> Self {
        Self {
            label,
            ..Self::default()
        }
    }

    pub fn bounds(self, lower: f64, upper: f64) -> Self {
        Self {
            lower,
            upper,
            ..self
        }
    }

    pub fn step(self, derivative_step: f64) -> Self {
        Self {
            derivative_step,
            ..self
        }
    }

    fn validate(&self) -> SolverResult<()> {
        if self.lower.is_nan() || self.upper.is_nan() || self.lower > self.upper {
            return Err(SolverError::InvalidInput {
                what: format!(
                    "{}: bounds [{}, {}] are empty",
                    self.label, self.lower, self.upper
                ),
            });
        }
        if !(self.derivative_step.is_finite() && self.derivative_step != 0.0) {
            return Err(SolverError::InvalidInput {
                what: format!(
                    "{}: derivative step {} is unusable",
                    self.label, self.derivative_step
                ),
            });
        }
        Ok(())
    }

    fn clamp(&self, x: f64) -> f64 {
        if x < self.lower {
            self.lower
        } else if x > self.upper {
            self.upper
        } else {
            x
        }
    }
}

/// Newton iteration result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonResult {
    /// Last evaluated iterate
    pub x: f64,
    /// Residual at `x`
    pub residual: f64,
    /// Newton updates performed
    pub iterations: usize,
    /// Converged flag
    pub converged: bool,
}

/// Solve `residual_fn(x) = 0` starting from `x0`.
pub fn newton_solve<F>(x0: f64, residual_fn: F, config: &NewtonConfig) -> SolverResult<NewtonResult>
where
    F: Fn(f64) -> SolverResult<f64>,
{
    config.validate()?;
    let mut x = config.clamp(x0);
    let mut iterations = 0;

    loop {
        let r = residual_fn(x)?;
        if !r.is_finite() {
            return Err(SolverError::NonFiniteResidual {
                what: config.label,
                at: x,
            });
        }

        if r.abs() < config.tolerance {
            return Ok(NewtonResult {
                x,
                residual: r,
                iterations,
                converged: true,
            });
        }

        if iterations >= config.max_iterations {
            tracing::debug!(
                solver = config.label,
                x,
                residual = r,
                iterations,
                "iteration cap reached"
            );
            return Ok(NewtonResult {
                x,
                residual: r,
                iterations,
                converged: false,
            });
        }

        let slope = forward_difference_from(&residual_fn, x, r, config.derivative_step)?;
        let step = r / slope;
        if !slope.is_finite() || slope.abs() < MIN_SLOPE || !step.is_finite() {
            return Err(SolverError::NumericalDivergence {
                what: config.label,
                at: x,
                slope,
            });
        }

        x = config.clamp(x - step);
        iterations += 1;
    }
}
