//! Request dispatch and upstream forwarding.
//!
//! # Data Flow
//! ```text
//! Inbound request (path, headers, body)
//!     → quantity.rs (byte-quantity grammar, downloads only)
//!     → upstream.rs (scheme propagation, target URI)
//!     → pooled hyper client (plain or TLS, decided by the target scheme)
//!     → upstream response returned to the caller unmodified
//! ```
//!
//! # Design Decisions
//! - One entry point, `Relay::handle`, independent of the host binding
//! - First match wins: `locations` before the download fallback (`ws` is
//!   claimed by the router before the dispatcher ever sees it)
//! - No caching, no retries: each proxied call is stateless and idempotent,
//!   transport failures surface as 502

pub mod quantity;
pub mod upstream;

use std::time::Duration;

use axum::body::Body;
use axum::http::uri::{Authority, InvalidUri, Uri};
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use thiserror::Error;

use crate::config::RelayConfig;

pub use quantity::{parse_quantity, ParseQuantityError, DEFAULT_BYTES};

type RelayClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Error type for dispatched requests.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Path segment does not name a byte quantity.
    #[error(transparent)]
    MalformedQuantity(#[from] ParseQuantityError),

    /// Outbound target URI could not be assembled.
    #[error("invalid upstream target: {0}")]
    Target(#[from] axum::http::Error),

    /// The proxied fetch failed at the transport level.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),
}

impl RelayError {
    /// Status the error surfaces as.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MalformedQuantity(_) => StatusCode::BAD_REQUEST,
            RelayError::Target(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            RelayError::MalformedQuantity(_) => self.to_string(),
            RelayError::Target(_) => "invalid upstream target".to_string(),
            RelayError::Upstream(_) => "upstream request failed".to_string(),
        };
        (status, body).into_response()
    }
}

/// The request dispatcher: rewrites inbound requests onto the speed-test
/// upstream and passes responses back untouched.
pub struct Relay {
    client: RelayClient,
    upstream_host: Authority,
    tls_terminated: bool,
}

impl Relay {
    /// Build a relay from validated configuration.
    pub fn new(config: &RelayConfig) -> Result<Self, InvalidUri> {
        let upstream_host = config.upstream.authority()?;

        let mut roots = rustls::RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        let tls = rustls::ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth();

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.timeouts.connect_secs)));
        connector.enforce_http(false);

        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_tls_config(tls)
            .https_or_http()
            .enable_http1()
            .enable_http2()
            .wrap_connector(connector);

        let client = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(Duration::from_secs(config.timeouts.idle_secs))
            .build(https);

        Ok(Self {
            client,
            upstream_host,
            tls_terminated: config.listener.tls.is_some(),
        })
    }

    /// Dispatch one inbound request to its upstream target.
    ///
    /// `locations` is passed through to the fixed locations endpoint; every
    /// other path is treated as a byte quantity for a `__down` fetch.
    pub async fn handle(&self, request: Request<Body>) -> Result<Response, RelayError> {
        let scheme = upstream::inbound_scheme(request.headers(), self.tls_terminated);
        let path = request.uri().path();
        let segment = path.strip_prefix('/').unwrap_or(path).to_owned();

        let target = if segment == "locations" {
            upstream::locations_target(scheme, &self.upstream_host)?
        } else {
            let bytes = quantity::parse_quantity(&segment)?;
            tracing::debug!(segment = %segment, bytes, "Download request");
            upstream::download_target(scheme, &self.upstream_host, bytes)?
        };

        self.forward(target, request).await
    }

    /// Forward the original request to `target`, streaming the response back.
    async fn forward(&self, target: Uri, request: Request<Body>) -> Result<Response, RelayError> {
        tracing::debug!(target = %target, "Forwarding to upstream");

        let (mut parts, body) = request.into_parts();
        // Hop-by-hop headers stay on this hop; the client derives Host from
        // the target authority.
        parts.headers.remove(header::HOST);
        parts.headers.remove(header::CONNECTION);

        let mut outbound = Request::builder().method(parts.method).uri(target);
        if let Some(headers) = outbound.headers_mut() {
            *headers = parts.headers;
        }
        let outbound = outbound.body(body)?;

        let response = self.client.request(outbound).await?;
        let (parts, body) = response.into_parts();
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}
