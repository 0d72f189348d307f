//! Outbound target construction and scheme propagation.
//!
//! # Design Decisions
//! - The relay matches the client's security level: outbound targets use the
//!   scheme the inbound request arrived on
//! - A fronting proxy is trusted via `x-forwarded-proto`; otherwise the
//!   listener's own TLS mode decides
//! - Targets are assembled with `http::Uri` parts, never string-spliced hosts

use axum::http::uri::{Authority, Scheme, Uri};
use axum::http::{Error as HttpError, HeaderMap};

/// Fixed upstream path serving the server-locations document.
pub const LOCATIONS_PATH: &str = "/locations";

/// Fixed upstream path serving `bytes`-sized download payloads.
pub const DOWNLOAD_PATH: &str = "/__down";

/// Determine the scheme the inbound request arrived on.
pub fn inbound_scheme(headers: &HeaderMap, tls_terminated: bool) -> Scheme {
    match headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
    {
        Some(proto) if proto.eq_ignore_ascii_case("https") => Scheme::HTTPS,
        Some(_) => Scheme::HTTP,
        None if tls_terminated => Scheme::HTTPS,
        None => Scheme::HTTP,
    }
}

/// Target URI for the server-locations passthrough.
pub fn locations_target(scheme: Scheme, host: &Authority) -> Result<Uri, HttpError> {
    Uri::builder()
        .scheme(scheme)
        .authority(host.clone())
        .path_and_query(LOCATIONS_PATH)
        .build()
}

/// Target URI for a download of `bytes` bytes.
pub fn download_target(scheme: Scheme, host: &Authority, bytes: u64) -> Result<Uri, HttpError> {
    Uri::builder()
        .scheme(scheme)
        .authority(host.clone())
        .path_and_query(format!("{DOWNLOAD_PATH}?bytes={bytes}"))
        .build()
}
