use crate::analysis::counter::FrequencyTable;
use crate::analysis::AnalysisError;
use crate::parser::ParsedRecord;

/// Failed-login count at which an IP is flagged when nothing else is configured.
pub const DEFAULT_FAILED_LOGIN_THRESHOLD: u32 = 10;

/// Accumulates per-IP, per-endpoint and failed-login tallies from parsed records.
///
/// Tables only grow through [`Aggregator::ingest`]; everything else is a read.
/// For every IP, `failed_login_count(ip) <= ip_count(ip)`.
#[derive(Debug, Clone)]
pub struct Aggregator {
    threshold: u32,
    ip_requests: FrequencyTable,
    endpoint_requests: FrequencyTable,
    failed_logins: FrequencyTable,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(DEFAULT_FAILED_LOGIN_THRESHOLD)
    }
}

impl Aggregator {
    /// Create an empty aggregator flagging IPs with at least `threshold`
    /// failed logins.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            ip_requests: FrequencyTable::new(),
            endpoint_requests: FrequencyTable::new(),
            failed_logins: FrequencyTable::new(),
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Fold one record into the tallies.
    ///
    /// A record without an IP contributes nothing, including its endpoint and
    /// status. Endpoint and status are counted independently of each other.
    pub fn ingest(&mut self, record: &ParsedRecord) {
        if !record.has_ip() {
            return;
        }

        self.ip_requests.increment(&record.ip);

        if record.has_endpoint() {
            self.endpoint_requests.increment(&record.endpoint);
        }

        if record.is_failed_login() {
            self.failed_logins.increment(&record.ip);
        }
    }

    /// IPs whose failed-login count reached the threshold, highest first.
    pub fn suspicious_ips(&self) -> Vec<(String, u64)> {
        let threshold = u64::from(self.threshold);
        self.failed_logins
            .ranked()
            .into_iter()
            .filter(|(_, count)| *count >= threshold)
            .collect()
    }

    /// The endpoint requested most often. Among tied endpoints the one seen
    /// first wins.
    pub fn most_accessed_endpoint(&self) -> Result<(String, u64), AnalysisError> {
        self.endpoint_requests
            .most_common()
            .map(|(endpoint, count)| (endpoint.to_string(), count))
            .ok_or(AnalysisError::EmptyState)
    }

    pub fn ordered_ip_counts(&self) -> Vec<(String, u64)> {
        self.ip_requests.ranked()
    }

    pub fn ordered_endpoint_counts(&self) -> Vec<(String, u64)> {
        self.endpoint_requests.ranked()
    }

    pub fn ip_count(&self, ip: &str) -> u64 {
        self.ip_requests.get(ip)
    }

    pub fn endpoint_count(&self, endpoint: &str) -> u64 {
        self.endpoint_requests.get(endpoint)
    }

    pub fn failed_login_count(&self, ip: &str) -> u64 {
        self.failed_logins.get(ip)
    }

    /// True until the first record carrying an IP is ingested.
    pub fn is_empty(&self) -> bool {
        self.ip_requests.is_empty()
    }

    pub fn unique_ips(&self) -> usize {
        self.ip_requests.len()
    }

    pub fn unique_endpoints(&self) -> usize {
        self.endpoint_requests.len()
    }
}
