//! Solver outputs annotated with convergence status.

use crate::newton::NewtonResult;

/// A flow together with how it was obtained.
///
/// `converged` is false when this solve, or any solve nested inside it, hit
/// its iteration cap. `iterations` counts the outermost Newton updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowEstimate {
    pub flow: f64,
    pub converged: bool,
    pub iterations: usize,
}

impl FlowEstimate {
    /// Zero flow across a path without a tension gradient. No iteration.
    pub fn no_gradient() -> Self {
        Self {
            flow: 0.0,
            converged: true,
            iterations: 0,
        }
    }

    pub(crate) fn from_solve(flow: f64, solve: &NewtonResult) -> Self {
        Self {
            flow,
            converged: solve.converged,
            iterations: solve.iterations,
        }
    }

    /// Fold in the status of solves nested inside this one.
    pub(crate) fn with_inner(self, inner: &[FlowEstimate]) -> Self {
        Self {
            converged: self.converged && inner.iter().all(|e| e.converged),
            ..self
        }
    }
}

/// A pressure (MPa) together with how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureEstimate {
    pub pressure: f64,
    pub converged: bool,
    pub iterations: usize,
}

impl PressureEstimate {
    pub(crate) fn from_solve(solve: &NewtonResult) -> Self {
        Self {
            pressure: solve.x,
            converged: solve.converged,
            iterations: solve.iterations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_failures_taint_the_outer_estimate() {
        let outer = FlowEstimate {
            flow: 3.0,
            converged: true,
            iterations: 4,
        };
        let stalled = FlowEstimate {
            converged: false,
            ..FlowEstimate::no_gradient()
        };
        let folded = outer.with_inner(&[FlowEstimate::no_gradient(), stalled]);
        assert!(!folded.converged);
        assert_eq!(folded.iterations, 4);
        assert_eq!(folded.flow, 3.0);
    }
}
