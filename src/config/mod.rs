use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Outbound HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Timeout for the forward call in seconds. `None` means the proxy
    /// imposes no timeout of its own; a hung upstream hangs the request.
    pub upstream_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            upstream_timeout_secs: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main proxy configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Outbound client configuration
    pub client: ClientConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ProxyConfig {
    /// Build a configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    ///
    /// Recognized variables: `FAULT_PROXY_HOST`, `FAULT_PROXY_PORT`,
    /// `FAULT_PROXY_LOG_LEVEL`, `FAULT_PROXY_UPSTREAM_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("FAULT_PROXY_HOST") {
            config.server.host = host;
        }

        if let Some(port) = std::env::var("FAULT_PROXY_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.server.port = port;
        }

        if let Ok(level) = std::env::var("FAULT_PROXY_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(timeout) = std::env::var("FAULT_PROXY_UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.client.upstream_timeout_secs = Some(timeout);
        }

        config
    }
}
