//! Report model and its renderers (console tables, CSV export).

pub mod console;
pub mod export;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::{Analysis, IngestStats};

/// A counted key, as shown in every report table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountRow {
    pub key: String,
    pub count: u64,
}

impl From<(String, u64)> for CountRow {
    fn from((key, count): (String, u64)) -> Self {
        Self { key, count }
    }
}

/// Everything a renderer needs, detached from the aggregator.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub threshold: u32,
    pub stats: IngestStats,
    pub requests_per_ip: Vec<CountRow>,
    pub requests_per_endpoint: Vec<CountRow>,
    /// `None` when no line carried both an IP and an endpoint.
    pub top_endpoint: Option<CountRow>,
    pub suspicious_ips: Vec<CountRow>,
}

impl AnalysisReport {
    pub fn build(source: &str, analysis: &Analysis) -> Self {
        let agg = &analysis.aggregator;

        let top_endpoint = match agg.most_accessed_endpoint() {
            Ok(top) => Some(CountRow::from(top)),
            Err(e) => {
                tracing::warn!(%source, error = %e, "no most-accessed endpoint");
                None
            }
        };

        let suspicious_ips: Vec<CountRow> =
            agg.suspicious_ips().into_iter().map(CountRow::from).collect();
        for row in &suspicious_ips {
            tracing::warn!(ip = %row.key, failed_logins = row.count, "suspicious login activity");
        }

        Self {
            source: source.to_string(),
            generated_at: Utc::now(),
            threshold: agg.threshold(),
            stats: analysis.stats,
            requests_per_ip: agg.ordered_ip_counts().into_iter().map(CountRow::from).collect(),
            requests_per_endpoint: agg
                .ordered_endpoint_counts()
                .into_iter()
                .map(CountRow::from)
                .collect(),
            top_endpoint,
            suspicious_ips,
        }
    }
}
