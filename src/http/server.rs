//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with the relay's three-way dispatch
//! - Wire up middleware (timeout, concurrency limit, request ID, tracing)
//! - Serve plain TCP or terminate TLS per the listener config
//! - Bridge matched requests into the transport-agnostic `Relay` core
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → /ws            → websocket.rs (upgrade or 426)
//!     → /, /{*segment} → relay_handler → Relay::handle → upstream
//! ```

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::uri::InvalidUri;
use axum::http::{header, HeaderValue, Request};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::http::request::{RequestIdExt, RequestIdLayer};
use crate::http::websocket::websocket_handler;
use crate::net::tls::load_tls_config;
use crate::observability::metrics;
use crate::relay::{Relay, RelayError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
}

/// HTTP server hosting the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, InvalidUri> {
        let relay = Arc::new(Relay::new(&config)?);
        let state = AppState { relay };
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Route order realizes first-match-wins dispatch: the exact `/ws` route
    /// beats the catch-all, and everything else funnels into the relay core.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        Router::new()
            .route("/ws", any(websocket_handler))
            .route("/", any(relay_handler))
            .route("/{*segment}", any(relay_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(GlobalConcurrencyLimitLayer::new(
                config.listener.max_connections,
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::SERVER,
                HeaderValue::from_static("speed-relay"),
            ))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            tls = self.config.listener.tls.is_some(),
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        match &self.config.listener.tls {
            Some(tls) => {
                let rustls_config =
                    load_tls_config(Path::new(&tls.cert_path), Path::new(&tls.key_path)).await?;

                let handle = axum_server::Handle::new();
                let drain = handle.clone();
                let grace = Duration::from_secs(self.config.timeouts.request_secs);
                tokio::spawn(async move {
                    let _ = shutdown.recv().await;
                    drain.graceful_shutdown(Some(grace));
                });

                axum_server::from_tcp_rustls(listener.into_std()?, rustls_config)
                    .handle(handle)
                    .serve(app)
                    .await?;
            }
            None => {
                axum::serve(listener, app)
                    .with_graceful_shutdown(async move {
                        let _ = shutdown.recv().await;
                    })
                    .await?;
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Catch-all dispatch handler: everything that is not `/ws`.
async fn relay_handler(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let start = Instant::now();
    let request_id = request.request_id().unwrap_or("unknown").to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let route = route_class(&path);

    tracing::debug!(
        request_id = %request_id,
        peer = %peer,
        method = %method,
        path = %path,
        "Dispatching request"
    );

    match state.relay.handle(request).await {
        Ok(response) => {
            metrics::record_request(&method, response.status().as_u16(), route, start);
            response
        }
        Err(error) => {
            match &error {
                RelayError::Upstream(_) => tracing::error!(
                    request_id = %request_id,
                    path = %path,
                    error = %error,
                    "Upstream request failed"
                ),
                _ => tracing::warn!(
                    request_id = %request_id,
                    path = %path,
                    error = %error,
                    "Request rejected"
                ),
            }
            let response = error.into_response();
            metrics::record_request(&method, response.status().as_u16(), route, start);
            response
        }
    }
}

/// Bounded route label for metrics.
fn route_class(path: &str) -> &'static str {
    if path == "/locations" {
        "locations"
    } else {
        "download"
    }
}
