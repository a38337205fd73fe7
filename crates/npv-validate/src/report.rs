//! JSON run report output.
//!
//! Optional machine-readable companion to the stderr failure lines, for
//! pipeline schedulers that want to archive pre-flight results.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use crate::batch::RunOutcome;
use crate::error::{Result, ValidateError};

const REPORT_SCHEMA: &str = "npverify.run-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

/// Top-level report document.
#[derive(Debug, Serialize)]
pub struct RunReportPayload {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub root: String,
    pub runs: Vec<RunReportEntry>,
}

/// One validated run root.
#[derive(Debug, Serialize)]
pub struct RunReportEntry {
    pub path: String,
    pub success: bool,
    pub reason: String,
}

/// Writes a versioned JSON report of run outcomes.
///
/// `root` is the directory the caller was asked to check (the run root
/// in single mode, the parent in batch mode).
pub fn write_run_report_json(
    output_path: &Path,
    root: &Path,
    outcomes: &[RunOutcome],
) -> Result<PathBuf> {
    let payload = RunReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        root: root.display().to_string(),
        runs: outcomes
            .iter()
            .map(|outcome| RunReportEntry {
                path: outcome.path.display().to_string(),
                success: outcome.result.success,
                reason: outcome.result.reason.clone(),
            })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(output_path, format!("{json}\n")).map_err(|source| {
        ValidateError::ReportWrite {
            path: output_path.to_path_buf(),
            source,
        }
    })?;
    Ok(output_path.to_path_buf())
}
