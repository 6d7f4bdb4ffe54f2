//! Application service layer for xylemflow.
//!
//! Compiles a `SimulationConfig` into solver-ready models, runs the predawn
//! sweep and writes its reports. The CLI is a thin shell over this crate.

pub mod compile;
pub mod error;
pub mod report;
pub mod run_service;

pub use compile::{RootZoneRuntime, SweepRuntime, compile_plant, compile_sweep, compile_variant};
pub use error::{AppError, AppResult};
pub use report::{render_tsv, write_json, write_tsv};
pub use run_service::{
    ScenarioRecord, SweepOutcome, SweepSummary, evaluate_scenario, predawn_grid, run_config,
    run_sweep,
};
