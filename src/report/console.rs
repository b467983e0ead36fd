//! Plain-text tables for the terminal.

use std::fmt::Write as _;

use super::{AnalysisReport, CountRow};

const KEY_WIDTH: usize = 18;
const COUNT_WIDTH: usize = 8;

/// Shown in place of the top endpoint when none was recorded.
pub const NO_ENDPOINT_MESSAGE: &str = "No endpoints were observed in the log.";

/// Format one table row: key left-aligned and cut to 18 chars, count
/// right-aligned in 8.
pub fn format_row(row: &CountRow) -> String {
    format!(
        "{:<kw$.kw$} {:>cw$}",
        row.key,
        row.count,
        kw = KEY_WIDTH,
        cw = COUNT_WIDTH
    )
}

fn push_table(out: &mut String, title: &str, count_header: &str, rows: &[CountRow]) {
    let _ = writeln!(out, "\n{}", title);
    let _ = writeln!(out, "{:<20} {}", "IP Address", count_header);
    for row in rows {
        let _ = writeln!(out, "{}", format_row(row));
    }
}

/// Render the complete console report.
pub fn render(report: &AnalysisReport) -> String {
    let mut out = String::new();

    push_table(
        &mut out,
        "Requests per IP Address:",
        "Request Count",
        &report.requests_per_ip,
    );

    let _ = writeln!(out, "\nMost Frequently Accessed Endpoint:");
    match &report.top_endpoint {
        Some(top) => {
            let _ = writeln!(out, "{} (Accessed {} times)", top.key, top.count);
        }
        None => {
            let _ = writeln!(out, "{}", NO_ENDPOINT_MESSAGE);
        }
    }

    if report.suspicious_ips.is_empty() {
        let _ = writeln!(out, "\nNo suspicious activity detected.");
    } else {
        push_table(
            &mut out,
            "Suspicious Activity Detected:",
            "Failed Login Attempts",
            &report.suspicious_ips,
        );
    }

    out
}
