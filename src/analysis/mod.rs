//! Traffic aggregation and brute-force login detection.

pub mod aggregator;
pub mod counter;
pub mod ingest;

use thiserror::Error;

pub use aggregator::{Aggregator, DEFAULT_FAILED_LOGIN_THRESHOLD};
pub use ingest::{analyze_file, analyze_reader, Analysis, IngestStats};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// No line ever carried both an IP and an endpoint.
    #[error("no endpoints were recorded")]
    EmptyState,
}
