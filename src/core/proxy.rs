use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use hyper::StatusCode;

use crate::config::ProxyConfig;
use crate::core::decision::{decide, Outcome};
use crate::core::forward::forward;
use crate::core::params::FaultParams;
use crate::core::response::ProxyResponse;
use crate::core::timing::TimingReport;
use crate::error::ProxyError;

/// Core proxy trait that defines the main functionality
#[async_trait]
pub trait Proxy: Send + Sync {
    /// Run the fault-injection algorithm for one request
    async fn process_request(&self, params: FaultParams) -> ProxyResponse;

    /// Start the proxy server
    async fn start(&self) -> Result<(), ProxyError>;

    /// Stop the proxy server
    async fn stop(&self) -> Result<(), ProxyError>;

    /// Check if the proxy is healthy
    async fn health_check(&self) -> bool;
}

/// Server state that can be mutated
struct ServerState {
    /// Server handle for graceful shutdown
    server_handle: Option<tokio::task::JoinHandle<()>>,
    /// Shutdown signal sender
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

/// Fault-injection proxy server
#[derive(Clone)]
pub struct FaultProxy {
    /// Proxy configuration
    config: ProxyConfig,
    /// Shared outbound HTTP client
    client: reqwest::Client,
    /// Server state (handle and shutdown sender)
    server_state: Arc<tokio::sync::Mutex<ServerState>>,
}

impl FaultProxy {
    /// Create a new fault proxy with the given configuration
    pub fn new(config: ProxyConfig) -> Result<Self, ProxyError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.client.upstream_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| ProxyError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            server_state: Arc::new(tokio::sync::Mutex::new(ServerState {
                server_handle: None,
                shutdown_tx: None,
            })),
        })
    }

    /// Parse the raw query string and run the algorithm, always producing a
    /// response with a timing report. Validation failures short-circuit
    /// before any network activity.
    pub async fn handle_query(&self, query: &HashMap<String, String>) -> ProxyResponse {
        let started = Instant::now();

        match FaultParams::from_query(query) {
            Ok(params) => self.run(params, started).await,
            Err(e) => {
                tracing::warn!("Rejected request: {}", e);
                let status = StatusCode::from_u16(e.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                ProxyResponse::error(status, &e.to_string(), total_timing(started))
            }
        }
    }

    /// The fault-injection algorithm: delay, maybe fail, otherwise forward
    async fn run(&self, params: FaultParams, started: Instant) -> ProxyResponse {
        let decision = decide(&params, &mut rand::thread_rng());
        let simulated = params.simulated_latency();

        if let Some(delay_ms) = decision.delay_ms {
            tracing::debug!(
                "Injecting {}ms latency (range {}..={}ms) for {}",
                delay_ms,
                params.min_latency_ms,
                params.max_latency_ms,
                params.target_url
            );
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        match decision.outcome {
            Outcome::Fail(code) => {
                tracing::info!(
                    "Injected failure {} for {} (failrate {})",
                    code,
                    params.target_url,
                    params.fail_rate
                );
                let timing = total_timing(started).with_simulated_latency(simulated);
                ProxyResponse::error(code, "Simulated failure", timing)
            }
            Outcome::Forward => match forward(&self.client, &params.target_url).await {
                Ok(outcome) => {
                    let timing = total_timing(started)
                        .with_fetch(outcome.fetch_ms)
                        .with_simulated_latency(simulated);
                    ProxyResponse::upstream(outcome.status, outcome.payload, timing)
                }
                Err(e) => {
                    tracing::warn!("Forward to {} failed: {}", params.target_url, e);
                    let timing = total_timing(started).with_simulated_latency(simulated);
                    ProxyResponse::error(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        &e.to_string(),
                        timing,
                    )
                }
            },
        }
    }
}

fn total_timing(started: Instant) -> TimingReport {
    TimingReport::new(started.elapsed().as_millis() as u64)
}

/// Convert a proxy response into an HTTP response. Identical parameters
/// must be allowed to yield different randomized outcomes on every call,
/// so caching is disabled unconditionally.
fn into_http_response(response: ProxyResponse) -> axum::http::Response<axum::body::Body> {
    axum::http::Response::builder()
        .status(response.status)
        .header(hyper::header::CONTENT_TYPE, "application/json")
        .header(hyper::header::CACHE_CONTROL, "no-store")
        .body(axum::body::Body::from(response.body.to_string()))
        .unwrap()
}

#[async_trait]
impl Proxy for FaultProxy {
    async fn process_request(&self, params: FaultParams) -> ProxyResponse {
        self.run(params, Instant::now()).await
    }

    async fn start(&self) -> Result<(), ProxyError> {
        // Check if server is already running
        let mut server_state = self.server_state.lock().await;
        if server_state.server_handle.is_some() {
            return Err(ProxyError::InternalError(
                "Server is already running".to_string(),
            ));
        }

        // Create a self reference for the handler closure
        let proxy_ref = Arc::new(self.clone());

        let app = axum::Router::new()
            // Liveness probe
            .route("/health", axum::routing::get(|| async { "OK" }))
            // The fault-injection endpoint
            .route(
                "/api/sandbox",
                axum::routing::get(
                    move |axum::extract::Query(query): axum::extract::Query<
                        HashMap<String, String>,
                    >| {
                        let proxy = proxy_ref.clone();
                        async move {
                            let response = proxy.handle_query(&query).await;
                            into_http_response(response)
                        }
                    },
                ),
            )
            // Add middleware for request tracing
            .layer(tower_http::trace::TraceLayer::new_for_http());

        let addr = format!("{}:{}", self.config.server.host, self.config.server.port)
            .parse()
            .map_err(|e| ProxyError::InternalError(format!("Invalid address: {}", e)))?;

        tracing::info!("Starting fault proxy server on {}", addr);

        // Create a shutdown channel
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = self.config.clone();

        // Start the server in a separate task
        let server_handle = tokio::spawn(async move {
            let server = axum::Server::bind(&addr).serve(app.into_make_service());

            let graceful = server.with_graceful_shutdown(async {
                shutdown_rx.await.ok();
                tracing::info!("Shutdown signal received, starting graceful shutdown");
            });

            if let Err(e) = graceful.await {
                tracing::error!("Server error: {}", e);
            }

            tracing::info!(
                "Server on {}:{} has been shut down",
                config.server.host,
                config.server.port
            );
        });

        // Store the server handle and shutdown sender
        server_state.server_handle = Some(server_handle);
        server_state.shutdown_tx = Some(shutdown_tx);

        tracing::info!("Fault proxy server started successfully");
        Ok(())
    }

    async fn stop(&self) -> Result<(), ProxyError> {
        let mut server_state = self.server_state.lock().await;

        if server_state.server_handle.is_none() {
            return Err(ProxyError::InternalError(
                "Server is not running".to_string(),
            ));
        }

        // Send shutdown signal
        if let Some(tx) = server_state.shutdown_tx.take() {
            // We don't care if the receiver is dropped
            let _ = tx.send(());
            tracing::info!("Shutdown signal sent to server");
        }

        // Wait for the server to shut down
        if let Some(handle) = server_state.server_handle.take() {
            match handle.await {
                Ok(_) => {
                    tracing::info!("Server has been shut down gracefully");
                    Ok(())
                }
                Err(e) => {
                    tracing::error!("Error while shutting down server: {}", e);
                    Err(ProxyError::InternalError(format!(
                        "Error while shutting down server: {}",
                        e
                    )))
                }
            }
        } else {
            Err(ProxyError::InternalError(
                "Server handle not found".to_string(),
            ))
        }
    }

    async fn health_check(&self) -> bool {
        true
    }
}
