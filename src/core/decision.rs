use hyper::StatusCode;
use rand::Rng;

use crate::core::params::FaultParams;

/// What the proxy should do with a request once the random draws are made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Return a synthetic error with the given status code
    Fail(StatusCode),

    /// Forward the request to the real target
    Forward,
}

/// The resolved fault plan for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Injected delay in milliseconds, if latency injection is active
    pub delay_ms: Option<u64>,

    /// Whether to fail synthetically or forward for real
    pub outcome: Outcome,
}

/// Resolve the randomized control flow for one request.
///
/// Pure with respect to the random source, so tests can drive it with a
/// seeded generator. Draw order is fixed: delay first, then the failure
/// draw, then (only on failure) the code selection.
pub fn decide<R: Rng + ?Sized>(params: &FaultParams, rng: &mut R) -> Decision {
    // Uniform integer in the inclusive range [min, max]. Parsing has
    // already rejected min > max.
    let delay_ms = if params.latency_requested() {
        Some(rng.gen_range(params.min_latency_ms..=params.max_latency_ms))
    } else {
        None
    };

    let outcome = if rng.gen::<f64>() < params.fail_rate {
        let code = if params.fail_codes.is_empty() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            params.fail_codes[rng.gen_range(0..params.fail_codes.len())]
        };
        Outcome::Fail(code)
    } else {
        Outcome::Forward
    };

    Decision { delay_ms, outcome }
}
