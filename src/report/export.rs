//! CSV export of an [`AnalysisReport`].
//!
//! The file holds three sections, each a title row, a header row and data
//! rows, separated by an empty line:
//!
//! 1. `Requests per IP`
//! 2. `Most Accessed Endpoint`
//! 3. `Suspicious Activity`

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use tracing::info;

use super::{AnalysisReport, CountRow};

/// Output path used when none is configured.
pub const DEFAULT_CSV_PATH: &str = "log_analysis_results.csv";

/// Row written in the endpoint section when no endpoint was recorded.
pub const NO_ENDPOINT_MARKER: &str = "(none)";

/// Write the report to a CSV file at `path`, replacing any existing file.
pub fn write_csv(report: &AnalysisReport, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create CSV file: {}", path.display()))?;
    write_report(report, file)
        .with_context(|| format!("failed to write CSV file: {}", path.display()))?;
    info!(path = %path.display(), "wrote CSV report");
    Ok(())
}

/// Write the report as CSV to any sink.
pub fn write_report<W: io::Write>(report: &AnalysisReport, sink: W) -> Result<()> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(sink);

    writer.write_record(["Requests per IP"])?;
    writer.write_record(["IP Address", "Request Count"])?;
    write_rows(&mut writer, &report.requests_per_ip)?;

    writer = blank_line(writer)?;
    writer.write_record(["Most Accessed Endpoint"])?;
    writer.write_record(["Endpoint", "Access Count"])?;
    match &report.top_endpoint {
        Some(top) => write_rows(&mut writer, std::slice::from_ref(top))?,
        None => writer.write_record([NO_ENDPOINT_MARKER, "0"])?,
    }

    writer = blank_line(writer)?;
    writer.write_record(["Suspicious Activity"])?;
    writer.write_record(["IP Address", "Failed Login Count"])?;
    write_rows(&mut writer, &report.suspicious_ips)?;

    writer.flush()?;
    Ok(())
}

// The csv writer quotes an empty record as `""`, so the separator goes to the
// sink directly.
fn blank_line<W: io::Write>(writer: csv::Writer<W>) -> Result<csv::Writer<W>> {
    let mut sink = writer.into_inner().map_err(|e| e.into_error())?;
    sink.write_all(b"\n")?;
    Ok(WriterBuilder::new().flexible(true).from_writer(sink))
}

fn write_rows<W: io::Write>(writer: &mut csv::Writer<W>, rows: &[CountRow]) -> Result<()> {
    for row in rows {
        writer.write_record([row.key.as_str(), row.count.to_string().as_str()])?;
    }
    Ok(())
}
