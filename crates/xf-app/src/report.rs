//! Sweep reports: two-column TSV and JSON.

use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::run_service::SweepOutcome;

/// One `{predawn}\t{value}` line per scenario, six decimals.
pub fn render_tsv(outcome: &SweepOutcome) -> String {
    let mut out = String::new();
    for r in &outcome.records {
        out.push_str(&format!("{:.6}\t{:.6}\n", r.predawn, r.value));
    }
    out
}

fn write_report(path: &Path, content: &str) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| AppError::ReportWrite {
            path: path.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, content).map_err(|source| AppError::ReportWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the TSV report, creating parent directories as needed.
pub fn write_tsv(path: &Path, outcome: &SweepOutcome) -> AppResult<()> {
    write_report(path, &render_tsv(outcome))?;
    tracing::info!(path = %path.display(), lines = outcome.records.len(), "wrote TSV report");
    Ok(())
}

/// Write the full outcome, convergence annotations included, as JSON.
pub fn write_json(path: &Path, outcome: &SweepOutcome) -> AppResult<()> {
    let content = serde_json::to_string_pretty(outcome)?;
    write_report(path, &content)?;
    tracing::info!(path = %path.display(), "wrote JSON report");
    Ok(())
}
