//! Saved JSON reports.

use crate::models::PlanRequest;
use crate::SubnetPlan;
use chrono_tz::Tz;
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};

/// A plan together with the request that produced it.
#[derive(Serialize, Debug)]
pub struct PlanReport<'a> {
    pub generated_at: String,
    pub request: &'a PlanRequest,
    pub plan: &'a SubnetPlan,
}

impl<'a> PlanReport<'a> {
    pub fn new(request: &'a PlanRequest, plan: &'a SubnetPlan, tz: Tz) -> Self {
        let now = chrono::Utc::now().with_timezone(&tz);
        PlanReport {
            generated_at: now.to_rfc3339(),
            request,
            plan,
        }
    }
}

/// File name for a report written on the given day.
pub fn report_file_name(tz: Tz) -> String {
    let now = chrono::Utc::now().with_timezone(&tz);
    format!("subnet_plan_{}.json", now.format("%Y-%m-%d"))
}

/// Write the report as pretty JSON into `dir`.
///
/// # Returns
/// * `Ok(PathBuf)` - The file written; an existing report from the same day
///   is overwritten
/// * `Err` - If `dir` does not exist or the file cannot be written
pub fn save_plan(report: &PlanReport, dir: &Path, tz: Tz) -> Result<PathBuf, Box<dyn Error>> {
    if !dir.is_dir() {
        return Err(format!("Report directory does not exist: {}", dir.display()).into());
    }
    let path = dir.join(report_file_name(tz));
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| format!("Error serializing JSON: {e}"))?;
    if path.exists() {
        log::warn!("Overwriting report file: {}", path.display());
    }
    std::fs::write(&path, json)
        .map_err(|e| format!("Error writing report file {}: {e}", path.display()))?;
    log::info!("Report written to {}", path.display());
    Ok(path)
}
