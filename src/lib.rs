//! logwarden -- access-log analysis for traffic patterns and brute-force logins.
//!
//! This crate provides the line parser, the streaming aggregator with its
//! suspicious-IP rule, and the console/CSV reporting built on top of them.

pub mod analysis;
pub mod config;
pub mod parser;
pub mod report;

use std::path::Path;

use anyhow::Result;

use crate::config::AnalyzerConfig;
use crate::report::AnalysisReport;

/// Analyze the log at `log_path` with the given configuration and return the
/// finished report. Nothing is written; see [`export`].
pub fn analyze(log_path: &Path, config: &AnalyzerConfig) -> Result<AnalysisReport> {
    config.validate()?;

    // 1. Ingest
    let analysis =
        analysis::analyze_file(log_path, config.detection.failed_login_threshold)?;

    // 2. Build report
    Ok(AnalysisReport::build(&log_path.display().to_string(), &analysis))
}

/// Write the CSV export when the configuration asks for it. Returns the path
/// written, if any.
pub fn export<'a>(
    report: &AnalysisReport,
    config: &'a AnalyzerConfig,
) -> Result<Option<&'a Path>> {
    if !config.output.write_csv {
        return Ok(None);
    }
    let path = config.output.csv_path.as_path();
    report::export::write_csv(report, path)?;
    Ok(Some(path))
}
