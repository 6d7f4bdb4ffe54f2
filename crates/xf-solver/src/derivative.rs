//! Finite difference derivatives of scalar residuals.

use crate::error::SolverResult;

/// Forward difference `(f(x + h) - fx) / h` reusing an already known `fx`.
pub fn forward_difference_from<F>(f: F, x: f64, fx: f64, h: f64) -> SolverResult<f64>
where
    F: Fn(f64) -> SolverResult<f64>,
{
    Ok((f(x + h)? - fx) / h)
}
