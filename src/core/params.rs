use std::collections::HashMap;

use hyper::StatusCode;

use crate::core::timing::SimulatedLatency;
use crate::error::ProxyError;

/// Fault-injection parameters for a single request
#[derive(Debug, Clone)]
pub struct FaultParams {
    /// Target URL to forward to
    pub target_url: String,

    /// Probability in [0,1] of an injected failure
    pub fail_rate: f64,

    /// Candidate status codes for an injected failure
    pub fail_codes: Vec<StatusCode>,

    /// Lower bound of the injected delay in milliseconds
    pub min_latency_ms: u64,

    /// Upper bound of the injected delay in milliseconds
    pub max_latency_ms: u64,
}

impl FaultParams {
    /// Parse fault parameters from the request query string.
    ///
    /// `url` is required; everything else defaults to "no fault". Invalid
    /// status codes and an inverted latency range are rejected outright
    /// rather than silently producing undefined behavior.
    pub fn from_query(query: &HashMap<String, String>) -> Result<Self, ProxyError> {
        let target_url = query
            .get("url")
            .filter(|v| !v.is_empty())
            .ok_or(ProxyError::MissingTargetUrl)?
            .clone();

        let fail_rate = query
            .get("failrate")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(0.0);

        let fail_codes = parse_fail_codes(query.get("failCodes").map(String::as_str))?;

        let min_latency_ms = parse_latency(query.get("minLatency").map(String::as_str));
        let max_latency_ms = parse_latency(query.get("maxLatency").map(String::as_str));

        if min_latency_ms > max_latency_ms {
            return Err(ProxyError::InvalidParameter(format!(
                "minLatency ({}) must not exceed maxLatency ({})",
                min_latency_ms, max_latency_ms
            )));
        }

        Ok(Self {
            target_url,
            fail_rate,
            fail_codes,
            min_latency_ms,
            max_latency_ms,
        })
    }

    /// Whether latency injection is requested at all
    pub fn latency_requested(&self) -> bool {
        self.min_latency_ms > 0 || self.max_latency_ms > 0
    }

    /// The `simulatedLatency` block for timing reports, present iff the
    /// latency parameters were non-zero
    pub fn simulated_latency(&self) -> Option<SimulatedLatency> {
        if self.latency_requested() {
            Some(SimulatedLatency {
                min: self.min_latency_ms,
                max: self.max_latency_ms,
                actual: self.max_latency_ms,
            })
        } else {
            None
        }
    }
}

/// Parse the comma-separated `failCodes` list into status codes.
///
/// An absent or empty parameter yields an empty list. Entries that are not
/// valid HTTP status codes are rejected with a validation error.
fn parse_fail_codes(raw: Option<&str>) -> Result<Vec<StatusCode>, ProxyError> {
    let raw = match raw {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Ok(Vec::new()),
    };

    raw.split(',')
        .map(|entry| {
            let entry = entry.trim();
            entry
                .parse::<u16>()
                .ok()
                .and_then(|code| StatusCode::from_u16(code).ok())
                .ok_or_else(|| {
                    ProxyError::InvalidParameter(format!(
                        "failCodes entry {:?} is not a valid HTTP status code",
                        entry
                    ))
                })
        })
        .collect()
}

fn parse_latency(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(0)
}
