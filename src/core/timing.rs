use serde::Serialize;

/// Details of an injected delay, reported back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulatedLatency {
    /// Lower bound of the requested delay range in milliseconds
    pub min: u64,

    /// Upper bound of the requested delay range in milliseconds
    pub max: u64,

    /// Reported delay in milliseconds (the range upper bound)
    pub actual: u64,
}

/// Timing breakdown attached to every response
#[derive(Debug, Clone, Serialize)]
pub struct TimingReport {
    /// Wall-clock duration of the whole request handling in milliseconds
    pub total: u64,

    /// Duration of the real forward call, present only when one occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch: Option<u64>,

    /// Injected delay details, present only when latency parameters were
    /// non-zero
    #[serde(rename = "simulatedLatency", skip_serializing_if = "Option::is_none")]
    pub simulated_latency: Option<SimulatedLatency>,
}

impl TimingReport {
    /// Create a timing report with only the total duration
    pub fn new(total_ms: u64) -> Self {
        Self {
            total: total_ms,
            fetch: None,
            simulated_latency: None,
        }
    }

    /// Set the forward-call duration for this report
    pub fn with_fetch(mut self, fetch_ms: u64) -> Self {
        self.fetch = Some(fetch_ms);
        self
    }

    /// Set the injected-delay details for this report
    pub fn with_simulated_latency(mut self, simulated: Option<SimulatedLatency>) -> Self {
        self.simulated_latency = simulated;
        self
    }
}
