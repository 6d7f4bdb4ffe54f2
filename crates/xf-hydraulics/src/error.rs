//! Error types for hydraulic model construction.

use thiserror::Error;
use xf_core::CoreError;

/// Errors raised while building conductance models from parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HydraulicsError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Root layer count {count} outside 1..={max}")]
    LayerCount { count: usize, max: usize },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type HydraulicsResult<T> = Result<T, HydraulicsError>;

impl From<HydraulicsError> for CoreError {
    fn from(e: HydraulicsError) -> Self {
        match e {
            HydraulicsError::NonPhysical { what } => CoreError::InvalidArg { what },
            HydraulicsError::InvalidArg { what } => CoreError::InvalidArg { what },
            HydraulicsError::LayerCount { .. } => CoreError::InvalidArg {
                what: "root layer count",
            },
            HydraulicsError::Core(inner) => inner,
        }
    }
}
