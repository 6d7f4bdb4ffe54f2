//! Error types for solver operations.

use thiserror::Error;
use xf_core::CoreError;
use xf_hydraulics::HydraulicsError;

/// Errors that can occur while solving for flows and pressures.
///
/// Running out of iterations is not an error: solvers return their last
/// iterate flagged as unconverged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    #[error("Numerical divergence in {what} at x = {at}: slope {slope}")]
    NumericalDivergence {
        what: &'static str,
        at: f64,
        slope: f64,
    },

    #[error("Non-finite residual in {what} at x = {at}")]
    NonFiniteResidual { what: &'static str, at: f64 },

    #[error("Hydraulics error: {0}")]
    Hydraulics(#[from] HydraulicsError),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for CoreError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::InvalidInput { what: _ } => CoreError::InvalidArg {
                what: "solver input",
            },
            SolverError::NumericalDivergence { what, slope, .. } => {
                CoreError::NonFinite { what, value: slope }
            }
            SolverError::NonFiniteResidual { what, at } => CoreError::NonFinite { what, value: at },
            SolverError::Hydraulics(inner) => inner.into(),
            SolverError::Core(inner) => inner,
        }
    }
}
