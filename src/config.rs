use std::time::Duration;

use crate::constants::lookup::DEFAULT_MIN_REQUEST_INTERVAL_MS;

/// Knobs for one candidate processing pass.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Minimum delay between consecutive lookup requests.
    ///
    /// This is a politeness contract with the remote lookup service and
    /// must be honored even when the transport could go faster. Tests
    /// and offline runs may set it to zero.
    pub min_request_interval: Duration,
    /// Process at most this many lookup identifiers per candidate
    /// (0 = all). Intended for smoke runs against the live service.
    pub lookup_limit: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_request_interval: Duration::from_millis(DEFAULT_MIN_REQUEST_INTERVAL_MS),
            lookup_limit: 0,
        }
    }
}
