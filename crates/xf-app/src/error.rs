//! Error types for the xf-app service layer.

use std::path::PathBuf;

/// Application error type wrapping the backend crates' errors behind one
/// interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Project(String),

    #[error("Model construction failed: {0}")]
    Compile(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Statistics error: {0}")]
    Statistics(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to write report: {path}")]
    ReportWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for xf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<xf_project::ProjectError> for AppError {
    fn from(err: xf_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<xf_project::ValidationError> for AppError {
    fn from(err: xf_project::ValidationError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<xf_hydraulics::HydraulicsError> for AppError {
    fn from(err: xf_hydraulics::HydraulicsError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<xf_solver::SolverError> for AppError {
    fn from(err: xf_solver::SolverError) -> Self {
        AppError::Solver(err.to_string())
    }
}

impl From<xf_core::CoreError> for AppError {
    fn from(err: xf_core::CoreError) -> Self {
        AppError::Statistics(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
