//! Access-log line parsing.
//!
//! Extracts the client IP, request path, and HTTP status from one line of a
//! common/combined format access log:
//!
//! `IP - - [DD/Mon/YYYY:HH:MM:SS +ZZZZ] "METHOD /path HTTP/x.x" status size ...`
//!
//! Each field is an independent regex search. A field that cannot be found
//! resolves to its sentinel (empty string or `0`) instead of an error, since
//! real logs are noisy and one bad line must not stop an analysis run.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// HTTP status recorded as a failed authentication attempt.
pub const STATUS_UNAUTHORIZED: u16 = 401;

// Four dot-separated digit groups at the start of the line. Octets are not
// range-checked. Digits are ASCII only: `\d` would also match other scripts.
static RE_IP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+\.[0-9]+\.[0-9]+\.[0-9]+)").expect("regex"));

static RE_ENDPOINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[A-Z]+ ([^ ]+)"#).expect("regex"));

static RE_STATUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"" ([0-9]{3})"#).expect("regex"));

/// Fields extracted from one log line.
///
/// `ParsedRecord::default()` is the all-sentinel record produced for a line
/// with nothing recognizable in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedRecord {
    /// Client address, or `""` when the line has no IP prefix.
    pub ip: String,
    /// Request path, or `""` when no quoted request line was found.
    pub endpoint: String,
    /// HTTP status, or `0` when none was found.
    pub status: u16,
}

impl ParsedRecord {
    /// True when the line yielded an IP. Records without one carry no
    /// statistics at all.
    pub fn has_ip(&self) -> bool {
        !self.ip.is_empty()
    }

    pub fn has_endpoint(&self) -> bool {
        !self.endpoint.is_empty()
    }

    pub fn is_failed_login(&self) -> bool {
        self.status == STATUS_UNAUTHORIZED
    }
}

/// Parse a single log line. Never fails.
pub fn parse_line(line: &str) -> ParsedRecord {
    let ip = RE_IP
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let endpoint = RE_ENDPOINT
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let status = RE_STATUS
        .captures(line)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u16>().ok())
        .unwrap_or(0);

    ParsedRecord {
        ip,
        endpoint,
        status,
    }
}
