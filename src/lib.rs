// Fault-Injection Proxy Library

pub mod config;
pub mod core;
pub mod error;

// Re-export commonly used types
pub use crate::config::{ClientConfig, LoggingConfig, ProxyConfig, ServerConfig};
pub use crate::core::{
    decision::{decide, Decision, Outcome},
    params::FaultParams,
    proxy::{FaultProxy, Proxy},
    response::ProxyResponse,
    timing::{SimulatedLatency, TimingReport},
};
pub use crate::error::ProxyError;
