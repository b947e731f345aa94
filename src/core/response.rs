use hyper::StatusCode;
use serde_json::Value;

use crate::core::timing::TimingReport;

/// Represents a response from the fault-injection proxy
#[derive(Debug, Clone)]
pub struct ProxyResponse {
    /// HTTP status code
    pub status: StatusCode,

    /// JSON response body
    pub body: Value,
}

impl ProxyResponse {
    /// Create an error envelope: `{"error": ..., "timing": ...}`
    pub fn error(status: StatusCode, message: &str, timing: TimingReport) -> Self {
        let body = serde_json::json!({
            "error": message,
            "timing": timing,
        });

        Self { status, body }
    }

    /// Create a response that relays an upstream payload with the timing
    /// report merged in.
    ///
    /// An upstream `timing` key is overwritten. Payloads that are not JSON
    /// objects are wrapped under a `data` key so the timing report always
    /// has somewhere to live.
    pub fn upstream(status: StatusCode, payload: Value, timing: TimingReport) -> Self {
        let timing_value =
            serde_json::to_value(timing).unwrap_or_else(|_| Value::Null);

        let body = match payload {
            Value::Object(mut map) => {
                map.insert("timing".to_string(), timing_value);
                Value::Object(map)
            }
            other => serde_json::json!({
                "data": other,
                "timing": timing_value,
            }),
        };

        Self { status, body }
    }
}
