//! Streaming a log file through the parser into an [`Aggregator`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::analysis::Aggregator;
use crate::parser::parse_line;

/// Line-level bookkeeping for one ingestion run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    pub lines_read: u64,
    /// Lines with no leading IP. They contribute nothing to the tallies.
    pub lines_without_ip: u64,
}

/// Result of ingesting one log.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub aggregator: Aggregator,
    pub stats: IngestStats,
}

/// Open `path` and ingest every line.
pub fn analyze_file(path: &Path, threshold: u32) -> Result<Analysis> {
    let file = File::open(path)
        .with_context(|| format!("failed to open log file: {}", path.display()))?;
    info!(path = %path.display(), threshold, "analyzing access log");

    let analysis = analyze_reader(BufReader::new(file), threshold)
        .with_context(|| format!("failed to read log file: {}", path.display()))?;

    info!(
        lines = analysis.stats.lines_read,
        without_ip = analysis.stats.lines_without_ip,
        unique_ips = analysis.aggregator.unique_ips(),
        unique_endpoints = analysis.aggregator.unique_endpoints(),
        "ingest complete"
    );
    Ok(analysis)
}

/// Ingest every line of `reader` in order.
///
/// Lines are split on `\n` and decoded lossily, so invalid UTF-8 degrades to
/// replacement characters instead of aborting the run.
pub fn analyze_reader<R: BufRead>(mut reader: R, threshold: u32) -> Result<Analysis> {
    let mut aggregator = Aggregator::new(threshold);
    let mut stats = IngestStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        stats.lines_read += 1;

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        let record = parse_line(line);

        if !record.has_ip() {
            stats.lines_without_ip += 1;
            debug!(line_no = stats.lines_read, "no IP on line, skipping");
        }
        aggregator.ingest(&record);
    }

    Ok(Analysis { aggregator, stats })
}
